use crate::aggregator::Aggregator;
use crate::composer;
use crate::composer::SortSpec;
use crate::config::EngineConfig;
use crate::controller::QueryController;
use crate::error::EngineError;
use crate::error::Result;
use crate::intent::QueryIntent;
use crate::navigator;
use crate::navigator::Direction;
use crate::navigator::SiblingCohort;
use crate::navigator::SiblingNavigator;
use crate::result_set::ResultSet;
use meal_catalog::Catalog;
use meal_catalog::HttpCatalog;
use meal_catalog::MealRecord;
use std::sync::Arc;
use tracing::info;

/// The four entry points the presentation layer uses, plus a factory for
/// per-view query controllers.
pub struct MealEngine<C> {
    catalog: Arc<C>,
    aggregator: Aggregator<C>,
    navigator: SiblingNavigator<C>,
    config: EngineConfig,
}

impl MealEngine<HttpCatalog> {
    /// Engine over the HTTP catalog described by `config.catalog`
    pub fn connect(config: EngineConfig) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let catalog = HttpCatalog::new(&config.catalog)?;
        info!(base_url = %catalog.base_url(), "meal engine connected");
        Self::new(Arc::new(catalog), config)
    }
}

impl<C: Catalog + 'static> MealEngine<C> {
    pub fn new(catalog: Arc<C>, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self {
            aggregator: Aggregator::new(Arc::clone(&catalog), config.default_sample.clone()),
            navigator: SiblingNavigator::new(Arc::clone(&catalog)),
            catalog,
            config,
        })
    }

    pub async fn resolve(&self, intent: &QueryIntent) -> ResultSet {
        self.aggregator.resolve(intent).await
    }

    pub fn apply(&self, results: &ResultSet, sort: SortSpec) -> Vec<MealRecord> {
        composer::apply(results.as_slice(), sort)
    }

    pub async fn build_cohort(&self, record: &MealRecord) -> SiblingCohort {
        self.navigator.build_cohort(record).await
    }

    pub fn step<'a>(
        &self,
        cohort: &'a SiblingCohort,
        direction: Direction,
    ) -> Option<(usize, &'a MealRecord)> {
        navigator::step(cohort, direction)
    }

    /// New controller for one view session, using the configured quiet
    /// period
    pub fn controller(&self) -> QueryController<C> {
        QueryController::new(self.aggregator.clone(), self.config.debounce())
    }

    pub fn navigator(&self) -> &SiblingNavigator<C> {
        &self.navigator
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

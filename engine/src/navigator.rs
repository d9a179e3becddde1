use meal_catalog::Catalog;
use meal_catalog::MealRecord;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Records sharing the focused record's category, in the order the category
/// filter returned them, plus where the focused record sits.
///
/// The member list is fixed once built; stepping only moves the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiblingCohort {
    members: Vec<MealRecord>,
    index: Option<usize>,
}

impl SiblingCohort {
    pub fn new(members: Vec<MealRecord>, focused_id: &str) -> Self {
        let index = members.iter().position(|member| member.id == focused_id);
        Self { members, index }
    }

    /// Index of the focused record, `None` when it is not in the cohort
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Index as a signed position, -1 when not found
    pub fn position(&self) -> i64 {
        self.index.map_or(-1, |index| index as i64)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[MealRecord] {
        &self.members
    }

    pub fn current(&self) -> Option<&MealRecord> {
        self.index.and_then(|index| self.members.get(index))
    }

    /// Navigation is enabled only when the focused record was found and has
    /// at least one sibling.
    pub fn can_step(&self) -> bool {
        self.index.is_some() && self.members.len() > 1
    }

    /// 1-based "n / total" label
    pub fn position_label(&self) -> Option<String> {
        self.index
            .map(|index| format!("{} / {}", index + 1, self.members.len()))
    }

    /// Move one step and return the new current record
    pub fn advance(&mut self, direction: Direction) -> Option<&MealRecord> {
        let (index, _) = step(self, direction)?;
        self.index = Some(index);
        self.members.get(index)
    }
}

/// Circular step from the cohort's current index. `None` when stepping is
/// disabled.
pub fn step(cohort: &SiblingCohort, direction: Direction) -> Option<(usize, &MealRecord)> {
    if !cohort.can_step() {
        return None;
    }
    let index = cohort.index?;
    let len = cohort.members.len();
    let target = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Previous => (index + len - 1) % len,
    };
    cohort.members.get(target).map(|record| (target, record))
}

/// Builds cohorts for focused records
pub struct SiblingNavigator<C> {
    catalog: Arc<C>,
}

impl<C> Clone for SiblingNavigator<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C: Catalog> SiblingNavigator<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub async fn build_cohort(&self, focused: &MealRecord) -> SiblingCohort {
        if focused.category.is_empty() {
            debug!(id = %focused.id, "record has no category, cohort disabled");
            return SiblingCohort::default();
        }
        let members = self.catalog.filter_by_category(&focused.category).await;
        let cohort = SiblingCohort::new(members, &focused.id);
        debug!(
            id = %focused.id,
            category = %focused.category,
            size = cohort.len(),
            position = cohort.position(),
            "built cohort"
        );
        cohort
    }

    /// Detail-view entry: look the record up, then build its cohort
    pub async fn open(&self, id: &str) -> Option<(MealRecord, SiblingCohort)> {
        let record = self.catalog.get_by_id(id).await?;
        let cohort = self.build_cohort(&record).await;
        Some((record, cohort))
    }

    /// Full record for the cohort's current member, falling back to the
    /// summary when the lookup fails
    pub async fn hydrate_current(&self, cohort: &SiblingCohort) -> Option<MealRecord> {
        let current = cohort.current()?;
        let full = self.catalog.get_by_id(&current.id).await;
        Some(full.unwrap_or_else(|| current.clone()))
    }
}

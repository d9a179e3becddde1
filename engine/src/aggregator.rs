use crate::config::DefaultSample;
use crate::intent::FacetSelection;
use crate::intent::QueryIntent;
use crate::result_set::ResultSet;
use futures::future::join_all;
use meal_catalog::Catalog;
use meal_catalog::MealRecord;
use std::sync::Arc;
use tracing::debug;

/// Turns a [`QueryIntent`] into upstream fetches and merges what comes back
/// into one [`ResultSet`].
pub struct Aggregator<C> {
    catalog: Arc<C>,
    default_sample: DefaultSample,
}

impl<C> Clone for Aggregator<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            default_sample: self.default_sample.clone(),
        }
    }
}

impl<C: Catalog> Aggregator<C> {
    pub fn new(catalog: Arc<C>, default_sample: DefaultSample) -> Self {
        Self {
            catalog,
            default_sample,
        }
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    pub async fn resolve(&self, intent: &QueryIntent) -> ResultSet {
        let results = match intent {
            QueryIntent::FreeText(text) => {
                let text = text.trim();
                if text.is_empty() {
                    self.sample().await
                } else {
                    debug!(text, "resolving free text");
                    ResultSet::from_records(self.catalog.search_by_name(text).await)
                }
            }
            QueryIntent::FacetFilter(selection) => self.resolve_facets(selection).await,
            QueryIntent::Default => self.sample().await,
        };
        debug!(intent = intent.kind(), count = results.len(), "resolved");
        results
    }

    /// Category first: only the first selected category goes upstream, with
    /// areas applied client-side. Without categories, only the first
    /// selected area goes upstream.
    async fn resolve_facets(&self, selection: &FacetSelection) -> ResultSet {
        if let Some(category) = selection.first_category() {
            debug!(category, "resolving facets by category");
            let partials = self.catalog.filter_by_category(category).await;
            let mut hydrated = self.hydrate(partials).await;
            if selection.has_areas() {
                hydrated.retain(|meal| selection.contains_area(&meal.area));
            }
            ResultSet::from_records(hydrated)
        } else if let Some(area) = selection.first_area() {
            debug!(area, "resolving facets by area");
            let partials = self.catalog.filter_by_area(area).await;
            ResultSet::from_records(self.hydrate(partials).await)
        } else {
            self.sample().await
        }
    }

    /// Fetch full detail for each summary concurrently. Output order is input
    /// order; a failed lookup keeps the summary.
    pub async fn hydrate(&self, partials: Vec<MealRecord>) -> Vec<MealRecord> {
        let lookups = join_all(partials.iter().map(|p| self.catalog.get_by_id(&p.id))).await;
        partials
            .into_iter()
            .zip(lookups)
            .map(|(partial, full)| full.unwrap_or(partial))
            .collect()
    }

    async fn sample(&self) -> ResultSet {
        match &self.default_sample {
            DefaultSample::Random { count } => {
                debug!(count, "sampling random records");
                ResultSet::from_records(self.random_draws(*count).await)
            }
            DefaultSample::Mixed {
                random,
                seed_categories,
                per_category,
                cap,
            } => {
                debug!(random, ?seed_categories, cap, "sampling mixed records");
                let seeds = join_all(
                    seed_categories
                        .iter()
                        .map(|category| self.catalog.filter_by_category(category)),
                );
                let (draws, seeds) = tokio::join!(self.random_draws(*random), seeds);

                let picks: Vec<MealRecord> = seeds
                    .into_iter()
                    .flat_map(|found| found.into_iter().take(*per_category))
                    .collect();
                // Seeded picks are only shown once hydrated.
                let details = join_all(picks.iter().map(|p| self.catalog.get_by_id(&p.id))).await;

                let mut results =
                    ResultSet::from_records(draws.into_iter().chain(details.into_iter().flatten()));
                results.truncate(*cap);
                results
            }
        }
    }

    async fn random_draws(&self, count: usize) -> Vec<MealRecord> {
        join_all((0..count).map(|_| self.catalog.get_random()))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCatalog;
    use crate::test_support::meal;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::time::Duration;

    fn aggregator(catalog: FakeCatalog) -> (Aggregator<FakeCatalog>, Arc<FakeCatalog>) {
        let catalog = Arc::new(catalog);
        (
            Aggregator::new(Arc::clone(&catalog), DefaultSample::default()),
            catalog,
        )
    }

    fn kitchen() -> Vec<MealRecord> {
        vec![
            meal("1", "Baked Salmon", "Seafood", "British"),
            meal("2", "Fish Tacos", "Seafood", "Mexican"),
            meal("3", "Sushi", "Seafood", "Japanese"),
            meal("4", "Beef Wellington", "Beef", "British"),
            meal("5", "Teriyaki Beef", "Beef", "Japanese"),
            meal("6", "Apple Crumble", "Dessert", "British"),
        ]
    }

    #[tokio::test]
    async fn test_free_text_preserves_upstream_order() {
        let (agg, catalog) = aggregator(FakeCatalog::new().with_search(
            "arrabiata",
            vec![
                MealRecord::full("52956", "Chicken Congee"),
                MealRecord::full("52771", "Arrabiata"),
            ],
        ));

        let results = agg.resolve(&QueryIntent::text("arrabiata")).await;

        assert_eq!(results.ids(), vec!["52956", "52771"]);
        assert_eq!(catalog.calls_to("search_by_name"), vec!["arrabiata"]);
    }

    #[tokio::test]
    async fn test_free_text_dedups_upstream_duplicates() {
        let (agg, _) = aggregator(FakeCatalog::new().with_search(
            "pie",
            vec![
                MealRecord::full("1", "Pie"),
                MealRecord::full("2", "Pork Pie"),
                MealRecord::full("1", "Pie again"),
            ],
        ));

        let results = agg.resolve(&QueryIntent::text("pie")).await;
        assert_eq!(results.ids(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_blank_text_behaves_as_default() {
        let (agg, catalog) = aggregator(FakeCatalog::new().with_randoms(vec![
            Some(MealRecord::full("1", "A")),
        ]));

        let results = agg.resolve(&QueryIntent::text("   ")).await;

        assert_eq!(results.ids(), vec!["1"]);
        assert!(catalog.calls_to("search_by_name").is_empty());
        assert_eq!(catalog.calls_to("get_random").len(), 8);
    }

    #[tokio::test]
    async fn test_default_drops_absent_and_dedups() {
        let draws = vec![
            Some(MealRecord::full("1", "A")),
            None,
            Some(MealRecord::full("2", "B")),
            Some(MealRecord::full("1", "A")),
            None,
            Some(MealRecord::full("3", "C")),
            None,
            None,
        ];
        let (agg, catalog) = aggregator(FakeCatalog::new().with_randoms(draws));

        let results = agg.resolve(&QueryIntent::Default).await;

        assert_eq!(results.ids(), vec!["1", "2", "3"]);
        assert_eq!(catalog.calls_to("get_random").len(), 8);
    }

    #[tokio::test]
    async fn test_facets_use_only_first_category() {
        let (agg, catalog) = aggregator(FakeCatalog::new().with_meals(kitchen()));

        let results = agg
            .resolve(&QueryIntent::facets(
                ["Seafood", "Beef"],
                Vec::<String>::new(),
            ))
            .await;

        assert_eq!(catalog.calls_to("filter_by_category"), vec!["Seafood"]);
        assert_eq!(results.ids(), vec!["1", "2", "3"]);
        assert!(results.iter().all(|meal| !meal.is_partial()));
    }

    #[tokio::test]
    async fn test_category_with_area_intersects_client_side() {
        let (agg, catalog) = aggregator(FakeCatalog::new().with_meals(kitchen()));

        let results = agg
            .resolve(&QueryIntent::facets(["Seafood"], ["Japanese", "British"]))
            .await;

        assert_eq!(results.ids(), vec!["1", "3"]);
        assert!(catalog.calls_to("filter_by_area").is_empty());
    }

    #[tokio::test]
    async fn test_area_only_uses_first_area() {
        let (agg, catalog) = aggregator(FakeCatalog::new().with_meals(kitchen()));

        let results = agg
            .resolve(&QueryIntent::facets(
                Vec::<String>::new(),
                ["Japanese", "British"],
            ))
            .await;

        assert_eq!(catalog.calls_to("filter_by_area"), vec!["Japanese"]);
        assert_eq!(results.ids(), vec!["3", "5"]);
    }

    #[tokio::test]
    async fn test_empty_facets_behave_as_default() {
        let (agg, catalog) = aggregator(FakeCatalog::new());

        let results = agg.resolve(&QueryIntent::FacetFilter(FacetSelection::default())).await;

        assert!(results.is_empty());
        assert_eq!(catalog.calls_to("get_random").len(), 8);
        assert!(catalog.calls_to("filter_by_category").is_empty());
    }

    #[tokio::test]
    async fn test_failed_hydration_keeps_partial() {
        let meals = vec![
            meal("10", "Brownies", "Dessert", "American"),
            meal("11", "Pavlova", "Dessert", "New Zealand"),
            meal("12", "Trifle", "Dessert", "British"),
        ];
        let (agg, _) = aggregator(
            FakeCatalog::new()
                .with_meals(meals.clone())
                .with_broken_lookup("11"),
        );

        let results = agg
            .resolve(&QueryIntent::facets(["Dessert"], Vec::<String>::new()))
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results.get(0), Some(&meals[0]));
        let second = results.get(1).unwrap();
        assert!(second.is_partial());
        assert_eq!(second.id, "11");
        assert_eq!(second.category, "Dessert");
        assert!(second.ingredients.is_empty());
        assert_eq!(results.get(2), Some(&meals[2]));
    }

    #[tokio::test]
    async fn test_area_filter_drops_unhydrated_summary() {
        // "1" would match British, but its summary never learns its area.
        let (agg, catalog) = aggregator(
            FakeCatalog::new()
                .with_meals(kitchen())
                .with_broken_lookup("1"),
        );

        let results = agg
            .resolve(&QueryIntent::facets(["Seafood"], ["British", "Japanese"]))
            .await;

        assert_eq!(results.ids(), vec!["3"]);
        assert_eq!(catalog.calls_to("get_by_id"), vec!["1", "2", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydration_order_ignores_completion_order() {
        let (agg, _) = aggregator(
            FakeCatalog::new()
                .with_meals(kitchen())
                .with_latency("get_by_id:1", Duration::from_millis(300))
                .with_latency("get_by_id:2", Duration::from_millis(200))
                .with_latency("get_by_id:3", Duration::from_millis(100)),
        );

        let results = agg
            .resolve(&QueryIntent::facets(["Seafood"], Vec::<String>::new()))
            .await;

        assert_eq!(results.ids(), vec!["1", "2", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydration_runs_concurrently() {
        let (agg, _) = aggregator(
            FakeCatalog::new()
                .with_meals(kitchen())
                .with_latency("get_by_id:1", Duration::from_millis(100))
                .with_latency("get_by_id:2", Duration::from_millis(100))
                .with_latency("get_by_id:3", Duration::from_millis(100)),
        );

        let started = tokio::time::Instant::now();
        agg.resolve(&QueryIntent::facets(["Seafood"], Vec::<String>::new()))
            .await;
        assert!(started.elapsed() < Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_mixed_sample_merges_seeds_and_caps() {
        let mut meals = kitchen();
        meals.push(meal("7", "Chicken Curry", "Chicken", "Indian"));
        meals.push(meal("8", "Beef Stew", "Beef", "Irish"));
        let catalog = Arc::new(FakeCatalog::new().with_meals(meals).with_randoms(vec![
            Some(meal("4", "Beef Wellington", "Beef", "British")),
            Some(meal("9", "Lasagne", "Pasta", "Italian")),
            None,
            Some(meal("9", "Lasagne", "Pasta", "Italian")),
        ]));
        let agg = Aggregator::new(
            Arc::clone(&catalog),
            DefaultSample::Mixed {
                random: 4,
                seed_categories: vec!["Beef".into(), "Chicken".into(), "Dessert".into()],
                per_category: 2,
                cap: 5,
            },
        );

        let results = agg.resolve(&QueryIntent::Default).await;

        // randoms first (4, 9), then Beef 4 (dup), 5, Chicken 7, Dessert 6 -> capped at 5
        assert_eq!(results.ids(), vec!["4", "9", "5", "7", "6"]);
        assert!(results.iter().all(|meal| !meal.is_partial()));
        assert_eq!(
            catalog
                .calls_to("filter_by_category")
                .into_iter()
                .collect::<HashSet<_>>(),
            HashSet::from(["Beef".to_string(), "Chicken".to_string(), "Dessert".to_string()])
        );
    }
}

/*!
# Meal Engine

Query aggregation and navigation over a [`meal_catalog::Catalog`]:

- **Aggregator**: free text, facet selections or "no filter" → upstream
  fetches → one ordered, identifier-unique [`ResultSet`]
- **Sibling navigation**: a focused record's category cohort with circular
  next/previous stepping
- **Sort composer**: stable, case-sensitive client-side ordering
- **Query controller**: debounced scheduling with sequence numbers so only
  the newest resolution reaches the view

## Pipeline

```text
QueryIntent ──(debounce 300ms)──> dispatch #n
  ├─ FreeText      search_by_name
  ├─ FacetFilter   filter_by_category(first) | filter_by_area(first)
  │                  └─ hydrate each via get_by_id (concurrent, order kept)
  │                  └─ area intersection (category path only)
  └─ Default       N × get_random (concurrent)
        └─ dedup by id ─> ResultSet ─> applied iff #n is the newest dispatched
```

## Example

```rust,no_run
use meal_engine::{Direction, EngineConfig, MealEngine, QueryIntent, SortSpec};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let engine = MealEngine::connect(EngineConfig::default())?;

    let results = engine.resolve(&QueryIntent::facets(["Seafood"], ["British"])).await;
    let sorted = engine.apply(&results, SortSpec::default());

    if let Some(first) = sorted.first() {
        let cohort = engine.build_cohort(first).await;
        if let Some((index, next)) = engine.step(&cohort, Direction::Next) {
            println!("next up: #{index} {}", next.name);
        }
    }
    Ok(())
}
```
*/

mod aggregator;
mod composer;
mod config;
mod controller;
mod debounce;
mod engine;
mod error;
mod intent;
mod navigator;
mod result_set;
#[cfg(test)]
mod test_support;

pub use aggregator::Aggregator;
pub use composer::SortDirection;
pub use composer::SortField;
pub use composer::SortSpec;
pub use composer::apply;
pub use config::DefaultSample;
pub use config::EngineConfig;
pub use controller::QueryController;
pub use controller::ViewState;
pub use debounce::DebounceTimer;
pub use debounce::SequenceCounter;
pub use engine::MealEngine;
pub use error::EngineError;
pub use error::Result;
pub use intent::FacetSelection;
pub use intent::QueryIntent;
pub use navigator::Direction;
pub use navigator::SiblingCohort;
pub use navigator::SiblingNavigator;
pub use navigator::step;
pub use result_set::ResultSet;

pub use meal_catalog::Catalog;
pub use meal_catalog::MealRecord;

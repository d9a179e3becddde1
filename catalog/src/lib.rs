/*!
# Meal Catalog

Typed, read-only client for the public meal catalog HTTP/JSON API.

## Features

- **Typed records**: `MealRecord` with an ordered ingredient list instead of
  numbered `strIngredientN` / `strMeasureN` fields
- **Partial vs full**: records from filter endpoints are marked
  [`Detail::Summary`] and carry the facet they were found by
- **Failure normalization**: transport errors, non-2xx responses and
  malformed bodies surface as an empty list or `None`, logged via `tracing`

## Endpoints

```text
search.php?s=<text>       search by name          (full)
search.php?f=<letter>     search by first letter  (full)
lookup.php?i=<id>         lookup by id            (full)
random.php                one random record       (full)
categories.php            category details
list.php?a=list           area names
list.php?i=list           ingredient names
filter.php?c=<category>   filter by category      (summary)
filter.php?a=<area>       filter by area          (summary)
filter.php?i=<ingredient> filter by ingredient    (summary)
```

## Example

```rust,no_run
use meal_catalog::{Catalog, CatalogConfig, HttpCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let catalog = HttpCatalog::new(&CatalogConfig::default())?;
    for meal in catalog.search_by_name("arrabiata").await {
        println!("{} ({})", meal.name, meal.area);
    }
    Ok(())
}
```
*/

mod client;
mod config;
mod error;
mod model;
mod wire;

pub use client::Catalog;
pub use client::HttpCatalog;
pub use config::CatalogConfig;
pub use config::DEFAULT_BASE_URL;
pub use error::CatalogError;
pub use error::Result;
pub use model::Category;
pub use model::Detail;
pub use model::Ingredient;
pub use model::MAX_INGREDIENTS;
pub use model::MealRecord;

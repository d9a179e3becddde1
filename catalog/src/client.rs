use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::error::Result;
use crate::model::Category;
use crate::model::Detail;
use crate::model::MealRecord;
use crate::wire::CategoriesEnvelope;
use crate::wire::MealsEnvelope;
use crate::wire::RawArea;
use crate::wire::RawIngredientName;
use crate::wire::RawMeal;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::warn;
use url::Url;

const SEARCH: &str = "search.php";
const LOOKUP: &str = "lookup.php";
const RANDOM: &str = "random.php";
const CATEGORIES: &str = "categories.php";
const LIST: &str = "list.php";
const FILTER: &str = "filter.php";

/// Read-only view of the meal catalog.
///
/// Implementations never fail: an upstream problem of any kind is reported
/// the same way as "nothing found", an empty list or `None`.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_by_name(&self, text: &str) -> Vec<MealRecord>;

    async fn search_by_first_letter(&self, letter: char) -> Vec<MealRecord>;

    async fn get_by_id(&self, id: &str) -> Option<MealRecord>;

    async fn get_random(&self) -> Option<MealRecord>;

    async fn list_category_details(&self) -> Vec<Category>;

    async fn list_categories(&self) -> Vec<String> {
        self.list_category_details()
            .await
            .into_iter()
            .map(|category| category.name)
            .collect()
    }

    async fn list_areas(&self) -> Vec<String>;

    async fn list_ingredients(&self) -> Vec<String>;

    /// Summary records in the category, in upstream order
    async fn filter_by_category(&self, name: &str) -> Vec<MealRecord>;

    /// Summary records from the area, in upstream order
    async fn filter_by_area(&self, name: &str) -> Vec<MealRecord>;

    /// Summary records using the ingredient, in upstream order
    async fn filter_by_ingredient(&self, name: &str) -> Vec<MealRecord>;
}

/// [`Catalog`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        config.validate().map_err(CatalogError::InvalidConfig)?;

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|err| CatalogError::InvalidConfig(err.to_string()))?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|err| CatalogError::InvalidConfig(err.to_string()))?;
        debug!(%url, ?query, "catalog request");

        let resp = self.http.get(url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        detail: Detail,
    ) -> Result<Vec<MealRecord>> {
        let envelope: MealsEnvelope<RawMeal> = self.get_json(endpoint, query).await?;
        Ok(envelope
            .into_items()
            .into_iter()
            .map(|raw| raw.into_record(detail))
            .collect())
    }

    /// Filter endpoints omit the facet they were queried by; stamp it back
    /// so a summary still knows where it came from.
    async fn fetch_facet(&self, key: &str, value: &str, op: &'static str) -> Vec<MealRecord> {
        let result = self
            .fetch_meals(FILTER, &[(key, value)], Detail::Summary)
            .await;
        let mut meals = settle_list(op, result);
        for meal in &mut meals {
            match key {
                "c" if meal.category.is_empty() => meal.category = value.to_string(),
                "a" if meal.area.is_empty() => meal.area = value.to_string(),
                _ => {}
            }
        }
        meals
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_by_name(&self, text: &str) -> Vec<MealRecord> {
        let result = self.fetch_meals(SEARCH, &[("s", text)], Detail::Full).await;
        settle_list("search_by_name", result)
    }

    async fn search_by_first_letter(&self, letter: char) -> Vec<MealRecord> {
        if !letter.is_alphanumeric() {
            return Vec::new();
        }
        let letter = letter.to_string();
        let result = self
            .fetch_meals(SEARCH, &[("f", letter.as_str())], Detail::Full)
            .await;
        settle_list("search_by_first_letter", result)
    }

    async fn get_by_id(&self, id: &str) -> Option<MealRecord> {
        if id.trim().is_empty() {
            return None;
        }
        let result = self.fetch_meals(LOOKUP, &[("i", id)], Detail::Full).await;
        settle_list("get_by_id", result).into_iter().next()
    }

    async fn get_random(&self) -> Option<MealRecord> {
        let result = self.fetch_meals(RANDOM, &[], Detail::Full).await;
        settle_list("get_random", result).into_iter().next()
    }

    async fn list_category_details(&self) -> Vec<Category> {
        let result = self
            .get_json::<CategoriesEnvelope>(CATEGORIES, &[])
            .await
            .map(CategoriesEnvelope::into_categories);
        settle_list("list_category_details", result)
    }

    async fn list_areas(&self) -> Vec<String> {
        let result = self
            .get_json::<MealsEnvelope<RawArea>>(LIST, &[("a", "list")])
            .await
            .map(|envelope| {
                envelope
                    .into_items()
                    .into_iter()
                    .map(|area| area.name)
                    .collect()
            });
        settle_list("list_areas", result)
    }

    async fn list_ingredients(&self) -> Vec<String> {
        let result = self
            .get_json::<MealsEnvelope<RawIngredientName>>(LIST, &[("i", "list")])
            .await
            .map(|envelope| {
                envelope
                    .into_items()
                    .into_iter()
                    .map(|ingredient| ingredient.name)
                    .collect()
            });
        settle_list("list_ingredients", result)
    }

    async fn filter_by_category(&self, name: &str) -> Vec<MealRecord> {
        self.fetch_facet("c", name, "filter_by_category").await
    }

    async fn filter_by_area(&self, name: &str) -> Vec<MealRecord> {
        self.fetch_facet("a", name, "filter_by_area").await
    }

    async fn filter_by_ingredient(&self, name: &str) -> Vec<MealRecord> {
        self.fetch_facet("i", name, "filter_by_ingredient").await
    }
}

fn settle_list<T>(op: &'static str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(op, error = %err, "catalog request failed, treating as empty");
            Vec::new()
        }
    }
}

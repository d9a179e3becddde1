//! In-memory catalog for engine tests.

use async_trait::async_trait;
use meal_catalog::Catalog;
use meal_catalog::Category;
use meal_catalog::MealRecord;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted catalog. `meals` plays the upstream database (full records, in
/// upstream order); filter calls return summaries the way the HTTP client
/// does, with only the queried facet stamped.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    meals: Vec<MealRecord>,
    searches: HashMap<String, Vec<MealRecord>>,
    randoms: Mutex<VecDeque<Option<MealRecord>>>,
    broken_lookups: HashSet<String>,
    latency: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meals(mut self, meals: Vec<MealRecord>) -> Self {
        self.meals = meals;
        self
    }

    pub fn with_search(mut self, text: &str, results: Vec<MealRecord>) -> Self {
        self.searches.insert(text.to_string(), results);
        self
    }

    pub fn with_randoms(self, draws: Vec<Option<MealRecord>>) -> Self {
        *self.randoms.lock().unwrap() = draws.into();
        self
    }

    pub fn with_broken_lookup(mut self, id: &str) -> Self {
        self.broken_lookups.insert(id.to_string());
        self
    }

    /// Delay the call identified as `"op:arg"`, e.g. `"search_by_name:beef"`
    pub fn with_latency(mut self, call: &str, delay: Duration) -> Self {
        self.latency.insert(call.to_string(), delay);
        self
    }

    /// Every call made so far, as `"op:arg"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of the calls made to `op`
    pub fn calls_to(&self, op: &str) -> Vec<String> {
        let prefix = format!("{op}:");
        self.calls()
            .into_iter()
            .filter_map(|call| call.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    async fn record(&self, op: &str, arg: &str) {
        let call = format!("{op}:{arg}");
        let delay = self.latency.get(&call).copied();
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn summary_of(meal: &MealRecord) -> MealRecord {
        let mut summary = MealRecord::summary(meal.id.clone(), meal.name.clone());
        summary.thumbnail = meal.thumbnail.clone();
        summary
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_by_name(&self, text: &str) -> Vec<MealRecord> {
        self.record("search_by_name", text).await;
        if let Some(scripted) = self.searches.get(text) {
            return scripted.clone();
        }
        let needle = text.to_lowercase();
        self.meals
            .iter()
            .filter(|meal| meal.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    async fn search_by_first_letter(&self, letter: char) -> Vec<MealRecord> {
        self.record("search_by_first_letter", &letter.to_string())
            .await;
        let letter = letter.to_lowercase().to_string();
        self.meals
            .iter()
            .filter(|meal| meal.name.to_lowercase().starts_with(&letter))
            .cloned()
            .collect()
    }

    async fn get_by_id(&self, id: &str) -> Option<MealRecord> {
        self.record("get_by_id", id).await;
        if self.broken_lookups.contains(id) {
            return None;
        }
        self.meals.iter().find(|meal| meal.id == id).cloned()
    }

    async fn get_random(&self) -> Option<MealRecord> {
        self.record("get_random", "").await;
        self.randoms.lock().unwrap().pop_front().flatten()
    }

    async fn list_category_details(&self) -> Vec<Category> {
        self.record("list_category_details", "").await;
        let mut seen = HashSet::new();
        self.meals
            .iter()
            .filter(|meal| !meal.category.is_empty() && seen.insert(meal.category.clone()))
            .enumerate()
            .map(|(n, meal)| Category {
                id: (n + 1).to_string(),
                name: meal.category.clone(),
                thumbnail: String::new(),
                description: String::new(),
            })
            .collect()
    }

    async fn list_areas(&self) -> Vec<String> {
        self.record("list_areas", "").await;
        let mut seen = HashSet::new();
        self.meals
            .iter()
            .filter(|meal| !meal.area.is_empty() && seen.insert(meal.area.clone()))
            .map(|meal| meal.area.clone())
            .collect()
    }

    async fn list_ingredients(&self) -> Vec<String> {
        self.record("list_ingredients", "").await;
        let mut seen = HashSet::new();
        self.meals
            .iter()
            .flat_map(|meal| meal.ingredients.iter())
            .filter(|ingredient| seen.insert(ingredient.name.clone()))
            .map(|ingredient| ingredient.name.clone())
            .collect()
    }

    async fn filter_by_category(&self, name: &str) -> Vec<MealRecord> {
        self.record("filter_by_category", name).await;
        self.meals
            .iter()
            .filter(|meal| meal.category == name)
            .map(|meal| Self::summary_of(meal).with_category(name))
            .collect()
    }

    async fn filter_by_area(&self, name: &str) -> Vec<MealRecord> {
        self.record("filter_by_area", name).await;
        self.meals
            .iter()
            .filter(|meal| meal.area == name)
            .map(|meal| Self::summary_of(meal).with_area(name))
            .collect()
    }

    async fn filter_by_ingredient(&self, name: &str) -> Vec<MealRecord> {
        self.record("filter_by_ingredient", name).await;
        self.meals
            .iter()
            .filter(|meal| meal.ingredients.iter().any(|i| i.name == name))
            .map(Self::summary_of)
            .collect()
    }
}

/// Full record with category and area set
pub(crate) fn meal(id: &str, name: &str, category: &str, area: &str) -> MealRecord {
    MealRecord::full(id, name)
        .with_category(category)
        .with_area(area)
        .with_instructions(format!("Cook {name}."))
}

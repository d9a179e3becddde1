//! Upstream JSON shapes and their mapping onto the public model.

use crate::model::Category;
use crate::model::Detail;
use crate::model::Ingredient;
use crate::model::MAX_INGREDIENTS;
use crate::model::MealRecord;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// `{"meals": [...] | null}`
#[derive(Debug, Deserialize)]
pub(crate) struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// `{"categories": [...] | null}`
#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Option<Vec<RawCategory>>,
}

impl CategoriesEnvelope {
    pub fn into_categories(self) -> Vec<Category> {
        self.categories
            .unwrap_or_default()
            .into_iter()
            .map(RawCategory::into_category)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategory {
    #[serde(rename = "idCategory", default)]
    id: Option<String>,
    #[serde(rename = "strCategory")]
    name: String,
    #[serde(rename = "strCategoryThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    description: Option<String>,
}

impl RawCategory {
    fn into_category(self) -> Category {
        Category {
            id: self.id.unwrap_or_default(),
            name: self.name,
            thumbnail: self.thumbnail.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

/// `list.php?a=list` entry
#[derive(Debug, Deserialize)]
pub(crate) struct RawArea {
    #[serde(rename = "strArea")]
    pub name: String,
}

/// `list.php?i=list` entry
#[derive(Debug, Deserialize)]
pub(crate) struct RawIngredientName {
    #[serde(rename = "strIngredient")]
    pub name: String,
}

/// A meal as upstream sends it: fixed fields plus the numbered
/// `strIngredientN` / `strMeasureN` pairs, which land in `numbered`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    video_url: Option<String>,
    #[serde(rename = "strSource", default)]
    source_url: Option<String>,
    #[serde(flatten)]
    numbered: HashMap<String, Value>,
}

impl RawMeal {
    pub fn into_record(self, detail: Detail) -> MealRecord {
        let ingredients = fold_ingredients(&self.numbered);
        MealRecord {
            id: self.id,
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            thumbnail: self.thumbnail.unwrap_or_default(),
            ingredients,
            tags: non_blank(self.tags),
            video_url: non_blank(self.video_url),
            source_url: non_blank(self.source_url),
            detail,
        }
    }
}

/// Walk `strIngredient1..=20` once, stopping at the first missing or blank
/// ingredient.
fn fold_ingredients(fields: &HashMap<String, Value>) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();
    for n in 1..=MAX_INGREDIENTS {
        let Some(name) = text_field(fields, &format!("strIngredient{n}")) else {
            break;
        };
        let measure = text_field(fields, &format!("strMeasure{n}")).unwrap_or_default();
        ingredients.push(Ingredient { name, measure });
    }
    ingredients
}

fn text_field(fields: &HashMap<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

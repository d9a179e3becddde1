use serde::Deserialize;
use serde::Serialize;

/// Upper bound of the numbered ingredient/measure fields upstream.
pub const MAX_INGREDIENTS: usize = 20;

/// How much of a record the upstream response carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detail {
    /// From a filter endpoint: id, name, thumbnail and the facet it was
    /// found by. Ingredients and instructions are absent.
    Summary,
    /// From search, lookup or random: every field upstream knows about
    Full,
}

/// One (ingredient, measure) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-form quantity; empty when upstream has none
    pub measure: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }
}

/// A meal as fetched from the catalog.
///
/// Identity is `id`: two records with the same id describe the same meal even
/// when their other fields differ (a summary and its hydrated form, say).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub thumbnail: String,
    pub ingredients: Vec<Ingredient>,
    pub tags: Option<String>,
    pub video_url: Option<String>,
    pub source_url: Option<String>,
    pub detail: Detail,
}

impl MealRecord {
    /// Summary record, as a filter endpoint returns it
    pub fn summary(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            area: String::new(),
            instructions: String::new(),
            thumbnail: String::new(),
            ingredients: Vec::new(),
            tags: None,
            video_url: None,
            source_url: None,
            detail: Detail::Summary,
        }
    }

    /// Full record with no optional fields set
    pub fn full(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            detail: Detail::Full,
            ..Self::summary(id, name)
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn is_partial(&self) -> bool {
        self.detail == Detail::Summary
    }

    /// Summary view of this record: what a filter endpoint would return
    pub fn to_summary(&self) -> Self {
        Self {
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
            ..Self::summary(self.id.clone(), self.name.clone())
        }
    }

    /// Instructions split into display steps. Upstream separates steps with
    /// line breaks (mostly `\r\n`); blank lines are dropped.
    pub fn instruction_steps(&self) -> Vec<&str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .collect()
    }

    /// Comma-separated tags, trimmed, blanks dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Category with its display metadata (`categories.php`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub description: String,
}

use meal_catalog::MealRecord;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Category,
    Area,
}

impl SortField {
    fn key(self, meal: &MealRecord) -> &str {
        match self {
            SortField::Name => &meal.name,
            SortField::Category => &meal.category,
            SortField::Area => &meal.area,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Area => "area",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header behaviour: the active field flips direction, any other
    /// field becomes active ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    fn compare(self, a: &MealRecord, b: &MealRecord) -> Ordering {
        let ordering = self.field.key(a).cmp(self.field.key(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sorted copy of `results`. Byte-wise (case-sensitive) comparison; equal
/// keys keep their input order in either direction.
pub fn apply(results: &[MealRecord], sort: SortSpec) -> Vec<MealRecord> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

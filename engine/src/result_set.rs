use meal_catalog::MealRecord;
use std::collections::HashMap;

/// Ordered, identifier-unique list of records for one query.
///
/// Only constructible through [`ResultSet::from_records`], which enforces the
/// uniqueness rule: the first occurrence of an id keeps its position, and a
/// later occurrence replaces it in place only when it upgrades a summary to a
/// full record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<MealRecord>,
}

impl ResultSet {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MealRecord>,
    {
        let mut merged: Vec<MealRecord> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in records {
            match positions.get(&record.id) {
                Some(&at) => {
                    if merged[at].is_partial() && !record.is_partial() {
                        merged[at] = record;
                    }
                }
                None => {
                    positions.insert(record.id.clone(), merged.len());
                    merged.push(record);
                }
            }
        }

        Self { records: merged }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MealRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MealRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[MealRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<MealRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MealRecord;
    type IntoIter = std::slice::Iter<'a, MealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl AsRef<[MealRecord]> for ResultSet {
    fn as_ref(&self) -> &[MealRecord] {
        &self.records
    }
}

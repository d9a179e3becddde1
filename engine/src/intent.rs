use indexmap::IndexSet;

/// Selected facet values, kept in selection order so "first selected" is
/// well defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    categories: IndexSet<String>,
    areas: IndexSet<String>,
}

impl FacetSelection {
    pub fn new<C, A>(categories: C, areas: A) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            areas: areas.into_iter().map(Into::into).collect(),
        }
    }

    /// Select the category, or deselect it if already selected. Deselecting
    /// keeps the remaining selection order.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.shift_remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    pub fn toggle_area(&mut self, area: &str) {
        if !self.areas.shift_remove(area) {
            self.areas.insert(area.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.areas.clear();
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    pub fn first_area(&self) -> Option<&str> {
        self.areas.first().map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(String::as_str)
    }

    pub fn has_areas(&self) -> bool {
        !self.areas.is_empty()
    }

    pub fn contains_area(&self, area: &str) -> bool {
        self.areas.contains(area)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.areas.is_empty()
    }
}

/// What the user currently wants to see. Exactly one is active per view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryIntent {
    /// Name search; blank text behaves as [`QueryIntent::Default`]
    FreeText(String),
    /// Category / area facets; an empty selection behaves as
    /// [`QueryIntent::Default`]
    FacetFilter(FacetSelection),
    /// No filter: a varied sample
    #[default]
    Default,
}

impl QueryIntent {
    pub fn text(text: impl Into<String>) -> Self {
        QueryIntent::FreeText(text.into())
    }

    pub fn facets<C, A>(categories: C, areas: A) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        QueryIntent::FacetFilter(FacetSelection::new(categories, areas))
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            QueryIntent::FreeText(_) => "free_text",
            QueryIntent::FacetFilter(_) => "facet_filter",
            QueryIntent::Default => "default",
        }
    }
}

impl From<FacetSelection> for QueryIntent {
    fn from(selection: FacetSelection) -> Self {
        QueryIntent::FacetFilter(selection)
    }
}

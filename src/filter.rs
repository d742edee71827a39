use crate::parser::SubjectView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Key(String),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "all" => CategoryFilter::All,
            key => CategoryFilter::Key(key.to_lowercase()),
        }
    }
}

/// Active filter button plus search box contents.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search: String,
}

impl FilterState {
    pub fn matches(&self, view: &SubjectView) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = view.title.to_lowercase().contains(&term)
            || view.code_display().to_lowercase().contains(&term);
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Key(k) => k == view.category,
        };
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, views: &'a [SubjectView]) -> Vec<&'a SubjectView> {
        views.iter().filter(|v| self.matches(v)).collect()
    }
}

//! Menu categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Pizzas,
    Kebabs,
    Boxes,
    Burgers,
    Chips,
    Tenders,
    Meals,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 7] = [
        Category::Pizzas,
        Category::Kebabs,
        Category::Boxes,
        Category::Burgers,
        Category::Chips,
        Category::Tenders,
        Category::Meals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pizzas => "PIZZAS",
            Category::Kebabs => "KEBABS",
            Category::Boxes => "BOXES",
            Category::Burgers => "BURGERS",
            Category::Chips => "CHIPS",
            Category::Tenders => "TENDERS",
            Category::Meals => "MEALS",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Pizzas => "Pizzas",
            Category::Kebabs => "Kebabs",
            Category::Boxes => "Boxes",
            Category::Burgers => "Burgers",
            Category::Chips => "Chips",
            Category::Tenders => "Tenders",
            Category::Meals => "Meals",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Menu tab selection: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Check whether a category passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// Parse `ALL` or a category code.
    pub fn from_code(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            Some(CategoryFilter::All)
        } else {
            Category::from_code(s).map(CategoryFilter::Only)
        }
    }

    /// Tabs in display order, `All` first.
    pub fn tabs() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.display_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes() {
        assert_eq!(Category::from_code("pizzas"), Some(Category::Pizzas));
        assert_eq!(Category::from_code("MEALS"), Some(Category::Meals));
        assert_eq!(Category::from_code("desserts"), None);
    }

    #[test]
    fn test_category_serde_uses_codes() {
        let json = serde_json::to_string(&Category::Tenders).unwrap();
        assert_eq!(json, "\"TENDERS\"");
        let parsed: Category = serde_json::from_str("\"KEBABS\"").unwrap();
        assert_eq!(parsed, Category::Kebabs);
    }

    #[test]
    fn test_filter() {
        assert!(CategoryFilter::All.matches(Category::Chips));
        assert!(CategoryFilter::Only(Category::Chips).matches(Category::Chips));
        assert!(!CategoryFilter::Only(Category::Chips).matches(Category::Boxes));
        assert_eq!(CategoryFilter::from_code("all"), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::tabs().count(), 8);
    }
}

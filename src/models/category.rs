//! Category model
//!
//! MoneyMoney exports categories as a flat list with an indentation level;
//! parent links and the backslash-separated path are rebuilt on import.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Separator MoneyMoney uses between category path segments
pub const PATH_SEPARATOR: char = '\\';

/// Whether a category collects income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A MoneyMoney category or category group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// MoneyMoney category UUID
    pub id: String,

    pub name: String,

    pub category_type: CategoryType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,

    /// Budget amount, only present when a positive budget is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,

    /// Budget period as reported by MoneyMoney (e.g. "monthly")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_period: Option<String>,

    /// Remaining budget in the current period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_available: Option<Money>,

    /// Nesting depth (0 = top level)
    pub indentation: usize,

    /// Category group (folder) rather than an assignable category
    pub group: bool,

    /// Raw MoneyMoney rule text used for automatic assignment
    #[serde(default)]
    pub rules: String,

    /// Full path, segments separated by a backslash
    pub path: String,
}

impl Category {
    /// Whether this category lies inside the subtree rooted at `root`
    pub fn is_under(&self, root: &str) -> bool {
        !root.is_empty()
            && (self.path == root
                || self
                    .path
                    .strip_prefix(root)
                    .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR)))
    }
}

/// Last segment of a category path
pub fn leaf_name(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(path: &str) -> Category {
        Category {
            id: "c".into(),
            name: leaf_name(path).into(),
            category_type: CategoryType::Expense,
            parent_id: None,
            parent_name: None,
            budget: None,
            budget_period: None,
            budget_available: None,
            indentation: 0,
            group: false,
            rules: String::new(),
            path: path.into(),
        }
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("Lebenshaltung\\Lebensmittel"), "Lebensmittel");
        assert_eq!(leaf_name("Gehalt"), "Gehalt");
        assert_eq!(leaf_name(""), "");
    }

    #[test]
    fn test_is_under() {
        assert!(category("Umbuchungen").is_under("Umbuchungen"));
        assert!(category("Umbuchungen\\Sparen").is_under("Umbuchungen"));
        assert!(!category("UmbuchungenAlt").is_under("Umbuchungen"));
        assert!(!category("Haushalt").is_under("Umbuchungen"));
        assert!(!category("Haushalt").is_under(""));
    }
}

//! Client-side transaction filters
//!
//! MoneyMoney only filters exports by account and date; category and
//! checkmark filters run here.

use crate::models::Transaction;

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the category name
    pub category: Option<String>,
    /// Only transactions without a category; takes precedence over `category`
    pub uncategorized: bool,
    /// Only checked (`Some(true)`) or unchecked (`Some(false)`) transactions
    pub checked: Option<bool>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(checked) = self.checked {
            if tx.checkmark != checked {
                return false;
            }
        }

        if self.uncategorized {
            return tx.category_name.as_deref().map_or(true, str::is_empty);
        }

        match &self.category {
            Some(needle) => tx
                .category_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
            None => true,
        }
    }

    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.into_iter().filter(|tx| self.matches(tx)).collect()
    }
}

//! Category lookup and usage statistics

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{MmError, MmResult};
use crate::models::{Category, CategoryType, Money, Transaction};
use crate::moneymoney::find_category;

/// How often a category was assigned in a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUsage {
    pub category_id: String,
    pub category_name: String,
    pub transaction_count: usize,
    pub total_amount: Money,
    pub category_type: CategoryType,
}

/// Resolve a category given either its UUID or its name
///
/// Names match case-insensitively, exact before substring.
pub fn resolve_category<'a>(categories: &'a [Category], key: &str) -> MmResult<&'a Category> {
    let key = key.trim();
    if key.is_empty() {
        return Err(MmError::Validation("Category name cannot be empty".into()));
    }
    let found = if Uuid::parse_str(key).is_ok() {
        categories.iter().find(|c| c.id.eq_ignore_ascii_case(key))
    } else {
        find_category(categories, key)
    };
    found.ok_or_else(|| MmError::category_not_found(key))
}

/// Count categorized transactions per category, most used first
///
/// A `limit` of zero returns every category.
pub fn category_usage(
    transactions: &[Transaction],
    categories: &[Category],
    limit: usize,
) -> Vec<CategoryUsage> {
    let types: HashMap<&str, CategoryType> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.category_type))
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut usage: HashMap<&str, CategoryUsage> = HashMap::new();

    for tx in transactions {
        let Some(id) = tx.category_id.as_deref() else {
            continue;
        };
        let entry = usage.entry(id).or_insert_with(|| {
            order.push(id);
            CategoryUsage {
                category_id: id.to_string(),
                category_name: tx
                    .category_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                transaction_count: 0,
                total_amount: Money::zero(),
                category_type: types.get(id).copied().unwrap_or_default(),
            }
        });
        entry.transaction_count += 1;
        entry.total_amount += tx.amount;
    }

    let mut results: Vec<CategoryUsage> = order
        .into_iter()
        .filter_map(|id| usage.remove(id))
        .collect();
    results.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));
    if limit > 0 {
        results.truncate(limit);
    }
    results
}

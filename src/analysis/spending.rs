//! Spending by category with budgets and period comparison

use std::collections::HashMap;

use serde::Serialize;

use super::round_tenths;
use crate::models::{Category, CategoryType, Money, Transaction};

/// Spending for one category in a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingAnalysis {
    pub category_name: String,
    pub category_path: String,
    pub category_type: CategoryType,
    /// Signed sum of the category's transactions
    pub actual: Money,
    pub transaction_count: usize,
    pub budget: Option<Money>,
    pub budget_period: Option<String>,
    /// Budget minus the absolute spending
    pub remaining: Option<Money>,
    pub percent_used: Option<f64>,
    /// Sum for the same category in the comparison period
    pub compare_actual: Option<Money>,
    /// Change of the absolute amount against the comparison period, in percent
    pub compare_change: Option<f64>,
}

impl SpendingAnalysis {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_some_and(|r| r.is_negative())
    }
}

struct Bucket<'a> {
    actual: Money,
    count: usize,
    category: Option<&'a Category>,
}

/// Group transactions by category name and compare against budgets
///
/// Transactions without a category are collected under `(Uncategorized)`.
/// When `compare` holds any transactions, each row also carries the sum of
/// the same category in that set. Rows are ordered by absolute amount.
pub fn compute_spending(
    transactions: &[Transaction],
    categories: &[Category],
    compare: Option<&[Transaction]>,
) -> Vec<SpendingAnalysis> {
    let by_id: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();
    let by_name: HashMap<&str, &Category> = categories
        .iter()
        .filter(|c| !c.group)
        .map(|c| (c.name.as_str(), c))
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Bucket> = HashMap::new();

    for tx in transactions {
        let key = tx.category_label();
        let bucket = buckets.entry(key).or_insert_with(|| {
            order.push(key);
            Bucket {
                actual: Money::zero(),
                count: 0,
                category: None,
            }
        });
        bucket.actual += tx.amount;
        bucket.count += 1;

        if let Some(category) = tx.category_id.as_deref().and_then(|id| by_id.get(id).copied()) {
            bucket.category = Some(category);
        } else if bucket.category.is_none() {
            bucket.category = by_name.get(key).copied();
        }
    }

    let previous: HashMap<&str, Money> = compare
        .unwrap_or_default()
        .iter()
        .fold(HashMap::new(), |mut sums, tx| {
            *sums.entry(tx.category_label()).or_insert_with(Money::zero) += tx.amount;
            sums
        });

    let mut results: Vec<SpendingAnalysis> = order
        .into_iter()
        .filter_map(|name| buckets.get(name).map(|bucket| (name, bucket)))
        .map(|(name, bucket)| build_row(name, bucket, &previous))
        .collect();

    results.sort_by(|a, b| b.actual.abs().cmp(&a.actual.abs()));
    results
}

fn build_row(name: &str, bucket: &Bucket, previous: &HashMap<&str, Money>) -> SpendingAnalysis {
    let (category_path, category_type, budget, budget_period) = match bucket.category {
        Some(category) => {
            let path = if category.path.is_empty() {
                category.name.clone()
            } else {
                category.path.clone()
            };
            let budget = category.budget.filter(|b| b.is_positive());
            let period = budget.and(category.budget_period.clone());
            (path, category.category_type, budget, period)
        }
        None => (name.to_string(), CategoryType::Expense, None, None),
    };

    let spent = bucket.actual.abs();
    let remaining = budget.map(|b| b - spent);
    let percent_used = budget.map(|b| round_tenths(spent.to_f64() / b.to_f64() * 100.0));

    let compare_actual = previous.get(name).copied();
    let compare_change = compare_actual.filter(|c| !c.is_zero()).map(|c| {
        let before = c.abs().to_f64();
        round_tenths((spent.to_f64() - before) / before * 100.0)
    });

    SpendingAnalysis {
        category_name: name.to_string(),
        category_path,
        category_type,
        actual: bucket.actual,
        transaction_count: bucket.count,
        budget,
        budget_period,
        remaining,
        percent_used,
        compare_actual,
        compare_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{categorized, category, tx};

    fn categories() -> Vec<Category> {
        let mut food = category("cat-food", "Leben\\Lebensmittel", CategoryType::Expense);
        food.budget = Some(Money::from_cents(40000));
        food.budget_period = Some("monthly".into());
        let mut salary = category("cat-salary", "Einkommen\\Gehalt", CategoryType::Income);
        salary.budget = Some(Money::zero());
        vec![food, salary]
    }

    #[test]
    fn test_groups_and_sorts_by_absolute_amount() {
        let cats = categories();
        let txs = vec![
            categorized("1", "2026-03-02", -12000, "REWE", &cats[0]),
            categorized("2", "2026-03-05", 350000, "ACME", &cats[1]),
            categorized("3", "2026-03-09", -8000, "EDEKA", &cats[0]),
            tx("4", "2026-03-10", -2500, "Kiosk"),
        ];

        let rows = compute_spending(&txs, &cats, None);
        let names: Vec<&str> = rows.iter().map(|r| r.category_name.as_str()).collect();
        assert_eq!(names, vec!["Gehalt", "Lebensmittel", "(Uncategorized)"]);

        let food = &rows[1];
        assert_eq!(food.actual, Money::from_cents(-20000));
        assert_eq!(food.transaction_count, 2);
        assert_eq!(food.category_path, "Leben\\Lebensmittel");
        assert_eq!(food.remaining, Some(Money::from_cents(20000)));
        assert_eq!(food.percent_used, Some(50.0));
        assert_eq!(food.budget_period.as_deref(), Some("monthly"));

        assert_eq!(rows[0].category_type, CategoryType::Income);
        assert_eq!(rows[0].budget, None);
        assert_eq!(rows[2].category_path, "(Uncategorized)");
        assert_eq!(rows[2].category_type, CategoryType::Expense);
    }

    #[test]
    fn test_over_budget() {
        let cats = categories();
        let txs = vec![categorized("1", "2026-03-02", -50000, "REWE", &cats[0])];
        let rows = compute_spending(&txs, &cats, None);
        assert!(rows[0].is_over_budget());
        assert_eq!(rows[0].percent_used, Some(125.0));
    }

    #[test]
    fn test_resolves_category_by_name() {
        let cats = categories();
        let mut by_name = tx("1", "2026-03-02", -1000, "REWE");
        by_name.category_name = Some("Lebensmittel".into());

        let rows = compute_spending(&[by_name], &cats, None);
        assert_eq!(rows[0].budget, Some(Money::from_cents(40000)));
    }

    #[test]
    fn test_comparison() {
        let cats = categories();
        let current = vec![categorized("1", "2026-03-02", -15000, "REWE", &cats[0])];
        let previous = vec![
            categorized("2", "2026-02-02", -10000, "REWE", &cats[0]),
            tx("3", "2026-02-03", -500, "Kiosk"),
        ];

        let rows = compute_spending(&current, &cats, Some(&previous));
        assert_eq!(rows[0].compare_actual, Some(Money::from_cents(-10000)));
        assert_eq!(rows[0].compare_change, Some(50.0));

        let without = compute_spending(&current, &cats, Some(&[]));
        assert_eq!(without[0].compare_actual, None);
        assert_eq!(without[0].compare_change, None);
    }
}

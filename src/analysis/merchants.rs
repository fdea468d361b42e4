//! Per-merchant and per-customer summaries

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use super::round_tenths;
use crate::models::{Money, Transaction};
use crate::rules::merchant::{group_by_merchant, most_common};

/// Amount sign filter for merchant analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TypeFilter {
    Income,
    #[default]
    Expense,
    All,
}

impl TypeFilter {
    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            Self::Income => tx.is_income(),
            Self::Expense => tx.is_expense(),
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantSummary {
    /// Most frequent counterparty name in the group
    pub merchant_name: String,
    pub transaction_count: usize,
    pub total_amount: Money,
    pub avg_amount: Money,
    /// Distinct category labels, sorted
    pub categories: Vec<String>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Share of total income, set for customer summaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_of_total: Option<f64>,
}

/// Summarize transactions per merchant, largest absolute total first
///
/// A `limit` of zero returns every merchant.
pub fn compute_merchant_summary(
    transactions: &[Transaction],
    limit: usize,
    filter: TypeFilter,
) -> Vec<MerchantSummary> {
    let mut results: Vec<MerchantSummary> =
        group_by_merchant(transactions.iter().filter(|tx| filter.matches(tx)))
            .into_iter()
            .filter_map(|(_, group)| summarize(&group))
            .collect();

    results.sort_by(|a, b| b.total_amount.abs().cmp(&a.total_amount.abs()));
    if limit > 0 {
        results.truncate(limit);
    }
    results
}

/// Merchant summary over income with each customer's share of total income
pub fn compute_top_customers(transactions: &[Transaction], limit: usize) -> Vec<MerchantSummary> {
    let total_income: Money = transactions
        .iter()
        .filter(|tx| tx.is_income())
        .map(|tx| tx.amount)
        .sum();

    let mut results = compute_merchant_summary(transactions, limit, TypeFilter::Income);
    if total_income.is_positive() {
        for summary in &mut results {
            summary.pct_of_total = Some(round_tenths(
                summary.total_amount.to_f64() / total_income.to_f64() * 100.0,
            ));
        }
    }
    results
}

fn summarize(group: &[&Transaction]) -> Option<MerchantSummary> {
    let total: Money = group.iter().map(|tx| tx.amount).sum();

    let mut categories: Vec<String> = group
        .iter()
        .map(|tx| tx.category_label().to_string())
        .collect();
    categories.sort();
    categories.dedup();

    let (name, _) = most_common(group.iter().map(|tx| tx.name.as_str()))?;

    Some(MerchantSummary {
        merchant_name: name.to_string(),
        transaction_count: group.len(),
        total_amount: total,
        avg_amount: Money::from_f64(total.to_f64() / group.len() as f64),
        categories,
        first_date: group.iter().map(|tx| tx.booking_date).min()?,
        last_date: group.iter().map(|tx| tx.booking_date).max()?,
        pct_of_total: None,
    })
}

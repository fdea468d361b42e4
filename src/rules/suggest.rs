//! Rule suggestions for uncategorized transactions
//!
//! Learns which category each merchant usually gets from the categorized
//! history and proposes a MoneyMoney rule pattern for every group of
//! uncategorized bookings.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::merchant::{group_by_merchant, merchant_key, most_common, title_case, PAYPAL_PREFIX};
use crate::models::{Category, Money, Transaction};

/// Category shown when no history matches
pub const NEEDS_MANUAL_ASSIGNMENT: &str = "(needs manual assignment)";

const MAX_SAMPLES: usize = 3;
const SAMPLE_PURPOSE_LEN: usize = 60;

/// How much history backs a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleTransaction {
    pub date: NaiveDate,
    pub name: String,
    pub amount: Money,
    pub purpose: String,
}

/// A proposed MoneyMoney rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSuggestion {
    /// Quoted rule pattern, e.g. `"REWE Markt"`
    pub pattern: String,
    pub suggested_category: String,
    pub category_path: String,
    pub match_count: usize,
    pub total_amount: Money,
    pub confidence: Confidence,
    /// Category whose rules already contain the pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_rule: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sample_transactions: Vec<SampleTransaction>,
}

impl RuleSuggestion {
    /// Already covered by an existing rule
    pub fn is_covered(&self) -> bool {
        self.existing_rule.is_some()
    }
}

/// (category name, category path) seen for a merchant in the history
type HistoryEntry = (String, String);

pub fn suggest_rules(
    uncategorized: &[Transaction],
    categorized: &[Transaction],
    categories: &[Category],
) -> Vec<RuleSuggestion> {
    let history = learn_history(categorized, categories);

    let mut suggestions: Vec<RuleSuggestion> = group_by_merchant(uncategorized)
        .into_iter()
        .map(|(key, txs)| {
            let matched = match_history(&key, &history);
            let pattern = rule_pattern(&key, &txs);
            let existing = find_existing_rule(&pattern, categories);

            let (suggested_category, category_path, confidence) = match matched {
                Some((name, path, confidence)) => (name, path, confidence),
                None => (
                    NEEDS_MANUAL_ASSIGNMENT.to_string(),
                    String::new(),
                    Confidence::Low,
                ),
            };

            RuleSuggestion {
                pattern,
                suggested_category,
                category_path,
                match_count: txs.len(),
                total_amount: txs.iter().map(|t| t.amount).sum(),
                confidence,
                existing_category: existing.map(|c| c.name.clone()),
                existing_rule: existing.map(|c| c.rules.clone()),
                sample_transactions: txs
                    .iter()
                    .take(MAX_SAMPLES)
                    .map(|t| SampleTransaction {
                        date: t.booking_date,
                        name: t.name.clone(),
                        amount: t.amount,
                        purpose: t.purpose.chars().take(SAMPLE_PURPOSE_LEN).collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        a.confidence
            .cmp(&b.confidence)
            .then(b.match_count.cmp(&a.match_count))
            .then(a.total_amount.cmp(&b.total_amount))
    });

    suggestions
}

/// Merchant key to the categories its bookings were given, in first-seen order
fn learn_history(
    categorized: &[Transaction],
    categories: &[Category],
) -> Vec<(String, Vec<HistoryEntry>)> {
    let paths: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.path.as_str()))
        .collect();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut history: Vec<(String, Vec<HistoryEntry>)> = Vec::new();

    for tx in categorized {
        let name = tx.category_name.clone().unwrap_or_default();
        let path = tx
            .category_id
            .as_deref()
            .and_then(|id| paths.get(id))
            .map(|p| p.to_string())
            .unwrap_or_else(|| name.clone());

        let key = merchant_key(&tx.name);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            history.push((key, Vec::new()));
            history.len() - 1
        });
        history[slot].1.push((name, path));
    }

    history
}

fn match_history(
    key: &str,
    history: &[(String, Vec<HistoryEntry>)],
) -> Option<(String, String, Confidence)> {
    if let Some((_, entries)) = history.iter().find(|(k, _)| k == key) {
        let (name, path, count) = dominant_category(entries)?;
        let confidence = if count >= 3 {
            Confidence::High
        } else {
            Confidence::Medium
        };
        return Some((name, path, confidence));
    }

    let (_, entries) = history.iter().find(|(k, _)| shares_prefix(key, k))?;
    let (name, path, count) = dominant_category(entries)?;
    let confidence = if count >= 2 {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    Some((name, path, confidence))
}

/// Keys of at least six characters agreeing on their first (up to) eight
fn shares_prefix(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let min_len = a.len().min(b.len());
    let n = min_len.min(8);
    min_len >= 6 && a[..n] == b[..n]
}

fn dominant_category(entries: &[HistoryEntry]) -> Option<(String, String, usize)> {
    let (name, count) = most_common(entries.iter().map(|(name, _)| name.as_str()))?;
    if name.is_empty() {
        return None;
    }
    let path = entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, p)| p.clone())
        .unwrap_or_default();
    Some((name.to_string(), path, count))
}

/// Quoted pattern matching every name in the group
fn rule_pattern(key: &str, txs: &[&Transaction]) -> String {
    if let Some(merchant) = key.strip_prefix(PAYPAL_PREFIX) {
        return format!("\"PayPal *{}\"", title_case(merchant));
    }

    let names: Vec<&str> = txs.iter().map(|t| t.name.trim()).collect();
    let first = names.first().copied().unwrap_or_default();
    if names.len() == 1 {
        return format!("\"{}\"", first);
    }

    let mut prefix: Vec<char> = first.chars().collect();
    for name in &names[1..] {
        let lower = name.to_lowercase();
        while prefix.len() > 3 && !lower.starts_with(&prefix.iter().collect::<String>().to_lowercase()) {
            prefix.pop();
        }
    }

    if prefix.len() > 3 {
        format!("\"{}\"", prefix.iter().collect::<String>().trim())
    } else {
        format!("\"{}\"", first)
    }
}

/// First category whose rule text already mentions the pattern
fn find_existing_rule<'a>(pattern: &str, categories: &'a [Category]) -> Option<&'a Category> {
    let needle = pattern.trim_matches('"').to_lowercase();
    categories
        .iter()
        .filter(|c| !c.rules.is_empty())
        .find(|c| c.rules.to_lowercase().contains(&needle))
}

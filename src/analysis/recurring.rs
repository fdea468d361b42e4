//! Recurring payment detection (subscriptions, standing orders)

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{Money, Transaction};
use crate::rules::merchant::{group_by_merchant, most_common};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// Classify an average booking interval in days
    pub fn from_interval(days: f64) -> Self {
        if days <= 45.0 {
            Self::Monthly
        } else if days <= 120.0 {
            Self::Quarterly
        } else {
            Self::Annual
        }
    }

    pub fn per_year(self) -> i64 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Annual => write!(f, "annual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringTransaction {
    /// Counterparty name of the latest booking
    pub merchant_name: String,
    pub category_name: String,
    pub avg_amount: Money,
    pub frequency: Frequency,
    pub occurrence_count: usize,
    pub total_annual_cost: Money,
    pub last_date: NaiveDate,
    /// Spread between the largest and smallest absolute amount
    pub amount_variance: Money,
}

/// Find merchants that were paid at a regular cadence
///
/// A merchant qualifies with at least `min_occurrences` bookings on at
/// least two distinct days. Results are ordered by annual cost.
pub fn detect_recurring(transactions: &[Transaction], min_occurrences: usize) -> Vec<RecurringTransaction> {
    let mut results: Vec<RecurringTransaction> = group_by_merchant(transactions)
        .into_iter()
        .filter(|(_, group)| group.len() >= min_occurrences.max(1))
        .filter_map(|(_, mut group)| {
            group.sort_by_key(|tx| tx.booking_date);
            summarize(&group)
        })
        .collect();

    results.sort_by(|a, b| b.total_annual_cost.cmp(&a.total_annual_cost));
    results
}

fn summarize(group: &[&Transaction]) -> Option<RecurringTransaction> {
    let intervals: Vec<i64> = group
        .windows(2)
        .map(|pair| (pair[1].booking_date - pair[0].booking_date).num_days())
        .filter(|days| *days > 0)
        .collect();
    if intervals.is_empty() {
        return None;
    }

    let avg_interval = intervals.iter().sum::<i64>() as f64 / intervals.len() as f64;
    let frequency = Frequency::from_interval(avg_interval);

    let total: Money = group.iter().map(|tx| tx.amount).sum();
    let avg_amount = Money::from_f64(total.to_f64() / group.len() as f64);

    let largest = group.iter().map(|tx| tx.amount.abs()).max()?;
    let smallest = group.iter().map(|tx| tx.amount.abs()).min()?;

    let (category_name, _) = most_common(group.iter().map(|tx| tx.category_label()))?;
    let latest = group.last()?;

    Some(RecurringTransaction {
        merchant_name: latest.name.clone(),
        category_name: category_name.to_string(),
        avg_amount,
        frequency,
        occurrence_count: group.len(),
        total_annual_cost: Money::from_cents(avg_amount.abs().cents() * frequency.per_year()),
        last_date: latest.booking_date,
        amount_variance: largest - smallest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, tx};

    #[test]
    fn test_frequency_thresholds() {
        assert_eq!(Frequency::from_interval(30.0), Frequency::Monthly);
        assert_eq!(Frequency::from_interval(45.0), Frequency::Monthly);
        assert_eq!(Frequency::from_interval(91.0), Frequency::Quarterly);
        assert_eq!(Frequency::from_interval(365.0), Frequency::Annual);
    }

    #[test]
    fn test_detects_monthly_subscription() {
        let txs = vec![
            tx("1", "2026-01-15", -1799, "Netflix International B.V."),
            tx("2", "2026-02-15", -1799, "NETFLIX INTERNATIONAL B.V."),
            tx("3", "2026-03-15", -1999, "Netflix International B.V."),
            tx("4", "2026-03-20", -4500, "REWE"),
        ];

        let found = detect_recurring(&txs, 3);
        assert_eq!(found.len(), 1);

        let netflix = &found[0];
        assert_eq!(netflix.frequency, Frequency::Monthly);
        assert_eq!(netflix.occurrence_count, 3);
        assert_eq!(netflix.avg_amount, Money::from_cents(-1866));
        assert_eq!(netflix.total_annual_cost, Money::from_cents(22392));
        assert_eq!(netflix.amount_variance, Money::from_cents(200));
        assert_eq!(netflix.last_date, date("2026-03-15"));
        assert_eq!(netflix.category_name, "(Uncategorized)");
    }

    #[test]
    fn test_same_day_bookings_are_not_recurring() {
        let txs = vec![
            tx("1", "2026-01-15", -500, "Parkhaus"),
            tx("2", "2026-01-15", -500, "Parkhaus"),
            tx("3", "2026-01-15", -500, "Parkhaus"),
        ];
        assert!(detect_recurring(&txs, 3).is_empty());
    }

    #[test]
    fn test_sorted_by_annual_cost() {
        let txs = vec![
            tx("1", "2025-01-01", -10000, "Versicherung AG"),
            tx("2", "2026-01-01", -10000, "Versicherung AG"),
            tx("3", "2026-01-05", -999, "Spotify AB"),
            tx("4", "2026-02-05", -999, "Spotify AB"),
        ];

        let found = detect_recurring(&txs, 2);
        assert_eq!(found[0].merchant_name, "Spotify AB");
        assert_eq!(found[0].total_annual_cost, Money::from_cents(11988));
        assert_eq!(found[1].frequency, Frequency::Annual);
    }
}

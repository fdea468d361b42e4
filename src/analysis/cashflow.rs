//! Income and expenses per month or quarter

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use super::period::{first_of_month, month_key, months_before, quarter_key};
use crate::models::{Money, Transaction};

/// Bucket size for cashflow analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Granularity {
    #[default]
    Monthly,
    Quarterly,
}

impl Granularity {
    fn key(self, date: NaiveDate) -> String {
        match self {
            Self::Monthly => month_key(date),
            Self::Quarterly => quarter_key(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowPeriod {
    /// `YYYY-MM` or `YYYY-QN`
    pub period: String,
    pub income: Money,
    /// Sum of non-positive amounts
    pub expenses: Money,
    pub net: Money,
    pub transaction_count: usize,
}

/// First day of the month `months - 1` months before `today`
pub fn cashflow_start(today: NaiveDate, months: u32) -> NaiveDate {
    months_before(first_of_month(today), months.saturating_sub(1))
}

/// Sum income and expenses per period, in chronological order
///
/// Transactions booked before [`cashflow_start`] are ignored.
pub fn compute_cashflow(
    transactions: &[Transaction],
    months: u32,
    granularity: Granularity,
    today: NaiveDate,
) -> Vec<CashflowPeriod> {
    let start = cashflow_start(today, months);
    let mut buckets: BTreeMap<String, CashflowPeriod> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| tx.booking_date >= start) {
        let key = granularity.key(tx.booking_date);
        let bucket = buckets.entry(key.clone()).or_insert_with(|| CashflowPeriod {
            period: key,
            income: Money::zero(),
            expenses: Money::zero(),
            net: Money::zero(),
            transaction_count: 0,
        });

        if tx.amount.is_positive() {
            bucket.income += tx.amount;
        } else {
            bucket.expenses += tx.amount;
        }
        bucket.net += tx.amount;
        bucket.transaction_count += 1;
    }

    buckets.into_values().collect()
}

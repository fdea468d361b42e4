//! Month-end balance reconstruction

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::period::{first_of_month, month_key, months_before};
use crate::models::{Account, Money, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSnapshot {
    /// `YYYY-MM`
    pub period: String,
    pub account_name: String,
    /// Balance at the end of the month (current balance for this month)
    pub balance: Money,
    /// Sum of the month's transactions
    pub change: Money,
}

/// Walk back from each account's current balance over `months` months
///
/// The current month reports the current balance. Each older month's
/// balance is the following month's balance minus that month's bookings.
/// Snapshots are chronological per account, accounts in input order.
pub fn compute_balance_history(
    accounts: &[Account],
    transactions: &[Transaction],
    months: u32,
    today: NaiveDate,
) -> Vec<BalanceSnapshot> {
    let mut sums: HashMap<(&str, String), Money> = HashMap::new();
    for tx in transactions {
        *sums
            .entry((tx.account_id.as_str(), month_key(tx.booking_date)))
            .or_insert_with(Money::zero) += tx.amount;
    }

    let current = first_of_month(today);
    let keys: Vec<String> = (0..months)
        .map(|i| month_key(months_before(current, i)))
        .collect();

    let mut results = Vec::with_capacity(accounts.len() * keys.len());
    for account in accounts {
        let month_sum = |key: &String| {
            sums.get(&(account.id.as_str(), key.clone()))
                .copied()
                .unwrap_or_default()
        };

        let mut balance = account.balance;
        let mut snapshots: Vec<BalanceSnapshot> = Vec::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                balance -= month_sum(&keys[i - 1]);
            }
            snapshots.push(BalanceSnapshot {
                period: key.clone(),
                account_name: account.name.clone(),
                balance,
                change: month_sum(key),
            });
        }

        snapshots.reverse();
        results.extend(snapshots);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, date, tx};

    #[test]
    fn test_reconstructs_backwards() {
        let accounts = vec![account("acc-1", "Giro", "DE89370400440532013000", "Privat", 100000)];
        let txs = vec![
            tx("1", "2026-03-05", 80000, "ACME"),
            tx("2", "2026-03-20", -30000, "Miete"),
            tx("3", "2026-02-11", -20000, "REWE"),
        ];

        let history = compute_balance_history(&accounts, &txs, 3, date("2026-03-25"));
        let periods: Vec<&str> = history.iter().map(|s| s.period.as_str()).collect();
        assert_eq!(periods, vec!["2026-01", "2026-02", "2026-03"]);

        assert_eq!(history[2].balance, Money::from_cents(100000));
        assert_eq!(history[2].change, Money::from_cents(50000));
        assert_eq!(history[1].balance, Money::from_cents(50000));
        assert_eq!(history[1].change, Money::from_cents(-20000));
        assert_eq!(history[0].balance, Money::from_cents(70000));
        assert_eq!(history[0].change, Money::zero());
    }

    #[test]
    fn test_no_transactions_keeps_balance_constant() {
        let accounts = vec![
            account("acc-1", "Giro", "", "Privat", 12345),
            account("acc-2", "Tagesgeld", "", "Privat", 500000),
        ];

        let history = compute_balance_history(&accounts, &[], 4, date("2026-01-10"));
        assert_eq!(history.len(), 8);
        assert_eq!(history[0].period, "2025-10");
        assert!(history[..4].iter().all(|s| s.balance == Money::from_cents(12345)));
        assert!(history[4..].iter().all(|s| s.account_name == "Tagesgeld"));
    }

    #[test]
    fn test_other_accounts_transactions_ignored() {
        let accounts = vec![account("acc-2", "Tagesgeld", "", "Privat", 1000)];
        let txs = vec![tx("1", "2026-01-05", 999, "ACME")];

        let history = compute_balance_history(&accounts, &txs, 2, date("2026-01-10"));
        assert_eq!(history[0].balance, Money::from_cents(1000));
    }
}

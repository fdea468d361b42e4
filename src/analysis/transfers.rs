//! Internal transfer (Umbuchung) detection
//!
//! A booking is an internal transfer when its counterparty is one of the
//! user's own accounts, or, failing that, when it is filed under the
//! transfer category subtree.

use std::collections::{HashMap, HashSet};

use crate::models::account::normalize_account_number;
use crate::models::{Account, Category, Transaction};

/// Ids of all categories under the transfer root (e.g. `Umbuchungen`)
pub fn transfer_category_ids(categories: &[Category], root: &str) -> HashSet<String> {
    categories
        .iter()
        .filter(|c| c.is_under(root))
        .map(|c| c.id.clone())
        .collect()
}

/// Classifies transactions as internal transfers
#[derive(Debug, Clone, Default)]
pub struct TransferDetector {
    category_ids: HashSet<String>,
    /// Normalized own account number or IBAN to lowercase group name
    own_accounts: HashMap<String, String>,
    /// Account UUID to lowercase group name
    account_groups: HashMap<String, String>,
    accounts_known: bool,
}

impl TransferDetector {
    /// Detector that only looks at the transfer category subtree
    pub fn new(categories: &[Category], root: &str) -> Self {
        Self {
            category_ids: transfer_category_ids(categories, root),
            ..Self::default()
        }
    }

    /// Also recognize bookings whose counterparty is one of these accounts
    pub fn with_accounts(mut self, accounts: &[Account]) -> Self {
        for account in accounts {
            let group = account.group.to_lowercase();
            for identifier in account.identifiers() {
                self.own_accounts.insert(identifier, group.clone());
            }
            self.account_groups.insert(account.id.clone(), group);
        }
        self.accounts_known = true;
        self
    }

    /// Group of the own account the counterparty refers to, if any
    fn counterparty_group(&self, tx: &Transaction) -> Option<&str> {
        if !self.accounts_known {
            return None;
        }
        let counterparty = tx.counterparty_iban.as_deref()?;
        if counterparty.trim().is_empty() {
            return None;
        }
        self.own_accounts
            .get(&normalize_account_number(counterparty))
            .map(String::as_str)
    }

    pub fn is_transfer_category(&self, tx: &Transaction) -> bool {
        tx.category_id
            .as_ref()
            .is_some_and(|id| self.category_ids.contains(id))
    }

    /// Counterparty is an own account, or the category marks a transfer
    pub fn is_transfer(&self, tx: &Transaction) -> bool {
        self.counterparty_group(tx).is_some() || self.is_transfer_category(tx)
    }

    /// Drop internal transfers
    ///
    /// With `active_groups`, a transfer between own accounts in different
    /// groups is real cashflow for the selected groups and is kept.
    pub fn filter(&self, transactions: Vec<Transaction>, active_groups: &[String]) -> Vec<Transaction> {
        transactions
            .into_iter()
            .filter(|tx| match self.counterparty_group(tx) {
                Some(counterparty_group) => {
                    if active_groups.is_empty() {
                        return false;
                    }
                    let source_group = self
                        .account_groups
                        .get(&tx.account_id)
                        .map(String::as_str)
                        .unwrap_or("");
                    source_group != counterparty_group
                }
                None => !self.is_transfer_category(tx),
            })
            .collect()
    }

    /// Keep only internal transfers
    pub fn extract(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions
            .into_iter()
            .filter(|tx| self.is_transfer(tx))
            .collect()
    }
}

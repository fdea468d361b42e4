//! Account selection
//!
//! Group and active filters for account listings, and the identifier sets
//! used to narrow transactions down to the accounts of selected groups.

use std::collections::HashSet;

use crate::error::{MmError, MmResult};
use crate::models::{Account, Transaction};

/// Filter applied to the account list
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Keep accounts in any of these groups (case-insensitive); empty keeps all
    pub groups: Vec<String>,
    /// Drop accounts in closed groups
    pub active_only: bool,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(mut self, groups: &[String]) -> Self {
        self.groups = groups.to_vec();
        self
    }

    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        if self.active_only && account.closed {
            return false;
        }
        self.groups.is_empty() || self.groups.iter().any(|g| account.in_group(g))
    }

    pub fn apply(&self, accounts: Vec<Account>) -> Vec<Account> {
        accounts.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Lowercased ids, IBANs and account numbers of all accounts in `groups`
pub fn group_account_ids(accounts: &[Account], groups: &[String]) -> HashSet<String> {
    accounts
        .iter()
        .filter(|a| groups.iter().any(|g| a.in_group(g)))
        .flat_map(|a| [a.id.as_str(), a.iban.as_str(), a.account_number.as_str()])
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Keep transactions booked on one of the given accounts
pub fn restrict_to_accounts(transactions: Vec<Transaction>, ids: &HashSet<String>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|tx| ids.contains(&tx.account_id.to_lowercase()))
        .collect()
}

/// Accounts matching a name substring or an exact IBAN, within `groups`
pub fn match_accounts(accounts: Vec<Account>, pattern: Option<&str>, groups: &[String]) -> Vec<Account> {
    let pattern = pattern.map(str::to_lowercase);
    accounts
        .into_iter()
        .filter(|a| groups.is_empty() || groups.iter().any(|g| a.in_group(g)))
        .filter(|a| match &pattern {
            Some(p) => a.name.to_lowercase().contains(p.as_str()) || a.iban.to_lowercase() == *p,
            None => true,
        })
        .collect()
}

/// Resolve an account by id, IBAN, account number or exact name
pub fn find_account<'a>(accounts: &'a [Account], key: &str) -> MmResult<&'a Account> {
    let key = key.trim();
    let compact = crate::models::account::normalize_account_number(key);
    accounts
        .iter()
        .find(|a| a.id == key || a.identifiers().any(|id| id == compact))
        .or_else(|| accounts.iter().find(|a| a.name.eq_ignore_ascii_case(key)))
        .ok_or_else(|| MmError::account_not_found(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, tx};

    fn accounts() -> Vec<Account> {
        let mut old = account("acc-3", "Altes Konto", "DE02120300000000202051", "Aufgelöst", 0);
        old.closed = true;
        vec![
            account("acc-1", "Girokonto", "DE89370400440532013000", "Privat", 100000),
            account("acc-2", "Geschäftskonto", "DE44500105175407324931", "Firma", 500000),
            old,
        ]
    }

    #[test]
    fn test_filter_active_and_groups() {
        let active = AccountFilter::new().active_only(true).apply(accounts());
        assert_eq!(active.len(), 2);

        let privat = AccountFilter::new()
            .groups(&["PRIVAT".to_string()])
            .apply(accounts());
        assert_eq!(privat.len(), 1);
        assert_eq!(privat[0].id, "acc-1");

        assert_eq!(AccountFilter::new().apply(accounts()).len(), 3);
    }

    #[test]
    fn test_group_account_ids() {
        let ids = group_account_ids(&accounts(), &["firma".to_string()]);
        assert!(ids.contains("acc-2"));
        assert!(ids.contains("de44500105175407324931"));
        assert!(!ids.contains("acc-1"));
    }

    #[test]
    fn test_restrict_to_accounts() {
        let ids = group_account_ids(&accounts(), &["privat".to_string()]);
        let mut other = tx("2", "2026-01-02", -100, "B");
        other.account_id = "acc-2".into();

        let kept = restrict_to_accounts(vec![tx("1", "2026-01-01", -100, "A"), other], &ids);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_match_accounts() {
        let by_name = match_accounts(accounts(), Some("konto"), &[]);
        assert_eq!(by_name.len(), 3);

        let by_iban = match_accounts(accounts(), Some("de89370400440532013000"), &[]);
        assert_eq!(by_iban.len(), 1);

        let in_group = match_accounts(accounts(), Some("konto"), &["Firma".to_string()]);
        assert_eq!(in_group[0].id, "acc-2");
    }

    #[test]
    fn test_find_account() {
        let accounts = accounts();
        assert_eq!(find_account(&accounts, "acc-2").unwrap().name, "Geschäftskonto");
        assert_eq!(find_account(&accounts, "DE89 3704 0044 0532 0130 00").unwrap().id, "acc-1");
        assert_eq!(find_account(&accounts, "girokonto").unwrap().id, "acc-1");

        let err = find_account(&accounts, "Sparbuch").unwrap_err();
        assert!(err.is_not_found());
    }
}

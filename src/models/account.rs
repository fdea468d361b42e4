//! Account model
//!
//! Read-only projection of an account as exported by MoneyMoney.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    #[serde(rename = "credit card")]
    CreditCard,
    Cash,
    Investment,
    Loan,
    #[default]
    Other,
}

impl AccountType {
    /// Map the type name MoneyMoney reports (English or German) to an account type
    pub fn from_moneymoney(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "giro account" | "girokonto" | "checking" => Self::Checking,
            "savings account" | "sparkonto" | "tagesgeldkonto" | "festgeldkonto" | "savings" => {
                Self::Savings
            }
            "credit card" | "kreditkarte" | "creditcard" => Self::CreditCard,
            "cash" | "bargeld" => Self::Cash,
            "portfolio" | "wertpapierdepot" | "depot" | "investment" => Self::Investment,
            "loan" | "kredit" | "darlehen" => Self::Loan,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "checking"),
            Self::Savings => write!(f, "savings"),
            Self::CreditCard => write!(f, "credit card"),
            Self::Cash => write!(f, "cash"),
            Self::Investment => write!(f, "investment"),
            Self::Loan => write!(f, "loan"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A bank account, credit card or depot in MoneyMoney
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// MoneyMoney account UUID
    pub id: String,

    pub name: String,

    /// Account number as shown by the bank (often the IBAN)
    pub account_number: String,

    pub bank_name: String,

    pub balance: Money,

    pub currency: String,

    pub account_type: AccountType,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub iban: String,

    #[serde(default)]
    pub bic: String,

    /// Name of the account group this account is listed under
    #[serde(default)]
    pub group: String,

    /// Securities depot rather than a cash account
    #[serde(default)]
    pub portfolio: bool,

    /// Listed under one of the configured closed groups
    #[serde(default)]
    pub closed: bool,
}

impl Account {
    /// Identifiers a counterparty could use to address this account
    ///
    /// Both the IBAN and the raw account number, normalized for comparison.
    pub fn identifiers(&self) -> impl Iterator<Item = String> + '_ {
        [self.iban.as_str(), self.account_number.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .map(normalize_account_number)
    }

    /// Case-insensitive group comparison
    pub fn in_group(&self, group: &str) -> bool {
        self.group.to_lowercase() == group.to_lowercase()
    }
}

/// Strip whitespace and uppercase an account number or IBAN
pub fn normalize_account_number(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Whether an account number is shaped like an IBAN (country code, check digits, BBAN)
pub fn looks_like_iban(value: &str) -> bool {
    let compact = normalize_account_number(value);
    let bytes = compact.as_bytes();
    (15..=34).contains(&bytes.len())
        && bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..4].iter().all(|b| b.is_ascii_digit())
        && bytes[4..].iter().all(|b| b.is_ascii_alphanumeric())
}

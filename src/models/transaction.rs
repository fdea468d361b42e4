//! Transaction model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A booking on a MoneyMoney account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Numeric MoneyMoney transaction id
    pub id: String,

    pub account_id: String,

    pub account_name: String,

    pub booking_date: NaiveDate,

    pub value_date: NaiveDate,

    pub amount: Money,

    pub currency: String,

    /// Counterparty name
    pub name: String,

    #[serde(default)]
    pub purpose: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// Leaf name of the assigned category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    pub checkmark: bool,

    #[serde(default)]
    pub comment: String,

    pub booked: bool,

    /// Counterparty account number or IBAN, when MoneyMoney knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty_iban: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }

    /// Category label used when grouping, `(Uncategorized)` when unassigned
    pub fn category_label(&self) -> &str {
        self.category_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Label for transactions without a category
pub const UNCATEGORIZED: &str = "(Uncategorized)";

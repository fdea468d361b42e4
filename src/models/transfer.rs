//! SEPA transfer order

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;

/// Where MoneyMoney should place a new transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferDestination {
    /// Open the transfer window for review and signing
    #[default]
    Window,
    /// Queue in the outbox for the next sync
    Outbox,
    /// Save as a draft
    Draft,
}

/// A validated SEPA credit transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SepaTransfer {
    /// Source account, by IBAN or name as MoneyMoney knows it
    pub from_account: String,

    pub recipient: String,

    /// Recipient IBAN, normalized
    pub iban: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,

    pub amount: Money,

    pub purpose: String,

    /// End-to-end reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Execution date for scheduled transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<NaiveDate>,
}

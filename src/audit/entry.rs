//! Audit entry data structures
//!
//! Defines the mutating operations mm-cli can perform against MoneyMoney
//! and the entry format written to the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{SepaTransfer, TransferDestination};

/// Mutating operations sent to MoneyMoney
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SetCategory,
    SetCheckmark,
    SetComment,
    CreateTransfer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::SetCategory => write!(f, "SET-CATEGORY"),
            Operation::SetCheckmark => write!(f, "SET-CHECKMARK"),
            Operation::SetComment => write!(f, "SET-COMMENT"),
            Operation::CreateTransfer => write!(f, "TRANSFER"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Transfer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation was sent (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Transaction id, or source account for transfers
    pub entity_id: String,

    /// Human-readable description (e.g. category or recipient name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Values sent to MoneyMoney
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// One-line summary of the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    pub fn new<T: Serialize>(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        details: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            details: serde_json::to_value(details).ok(),
            summary: None,
        }
    }

    /// Category assignment on a transaction
    pub fn set_category(transaction_id: &str, category_id: &str, category_path: &str) -> Self {
        Self::new(
            Operation::SetCategory,
            EntityType::Transaction,
            transaction_id,
            &serde_json::json!({ "category_id": category_id, "category": category_path }),
        )
        .with_name(category_path)
        .with_summary(format!("category -> {}", category_path))
    }

    pub fn set_checkmark(transaction_id: &str, checked: bool) -> Self {
        let state = if checked { "on" } else { "off" };
        Self::new(
            Operation::SetCheckmark,
            EntityType::Transaction,
            transaction_id,
            &serde_json::json!({ "checkmark": checked }),
        )
        .with_summary(format!("checkmark -> {}", state))
    }

    pub fn set_comment(transaction_id: &str, comment: &str) -> Self {
        Self::new(
            Operation::SetComment,
            EntityType::Transaction,
            transaction_id,
            &serde_json::json!({ "comment": comment }),
        )
        .with_summary(format!("comment -> \"{}\"", comment))
    }

    /// Transfer handed to MoneyMoney, keyed by source account
    pub fn create_transfer(transfer: &SepaTransfer, destination: TransferDestination) -> Self {
        let mut details = serde_json::to_value(transfer).unwrap_or_default();
        if let Some(map) = details.as_object_mut() {
            map.insert("destination".into(), serde_json::json!(destination));
        }
        Self::new(
            Operation::CreateTransfer,
            EntityType::Transfer,
            transfer.from_account.as_str(),
            &details,
        )
        .with_name(transfer.recipient.as_str())
        .with_summary(format!("{} to {}", transfer.amount, transfer.iban))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  Changes: {}", summary));
        }

        output
    }
}

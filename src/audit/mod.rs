//! Audit logging for changes sent to MoneyMoney
//!
//! Every mutating command (category, checkmark and comment edits, transfers)
//! is recorded in an append-only JSONL log next to the configuration file.
//!
//! # Example
//!
//! ```rust,ignore
//! use mm_cli::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::set_checkmark("12345", true))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

//! Service layer for mm-cli
//!
//! Lookups, filters and validation that sit between the MoneyMoney bridge
//! and the command handlers.

pub mod account;
pub mod category;
pub mod transaction;
pub mod transfer;

pub use account::{find_account, group_account_ids, match_accounts, restrict_to_accounts, AccountFilter};
pub use category::{category_usage, resolve_category, CategoryUsage};
pub use transaction::TransactionFilter;
pub use transfer::{normalize_iban, validate_bic, validate_iban, TransferRequest};

//! Core data models for mm-cli
//!
//! Read-only projections of the accounts, categories, transactions and
//! depots owned by MoneyMoney.

pub mod account;
pub mod category;
pub mod money;
pub mod portfolio;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountType};
pub use category::{Category, CategoryType};
pub use money::Money;
pub use portfolio::{Portfolio, Security};
pub use transaction::{Transaction, UNCATEGORIZED};
pub use transfer::{SepaTransfer, TransferDestination};

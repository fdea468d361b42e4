//! mm-cli - command-line front end for the MoneyMoney finance app
//!
//! This library drives MoneyMoney on macOS through its AppleScript
//! interface and adds analysis on top of the exported data: spending by
//! category, cash flow, recurring payments, merchants, balance history
//! and rule suggestions for uncategorized transactions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, categories, etc.)
//! - `moneymoney`: AppleScript bridge and property list decoding
//! - `services`: Filtering and lookup over exported data
//! - `analysis`: Spending, cash flow and balance computations
//! - `rules`: Merchant normalization and rule suggestions
//! - `audit`: Audit logging for changes sent to MoneyMoney
//! - `export`: Statement export formats
//! - `display`: Table, JSON, CSV and YAML rendering
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use mm_cli::config::{MmPaths, Settings};
//! use mm_cli::moneymoney::MoneyMoney;
//!
//! let paths = MmPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mm = MoneyMoney::connect().with_closed_groups(settings.closed_groups.clone());
//! let accounts = mm.accounts()?;
//! ```

pub mod analysis;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod moneymoney;
pub mod rules;
pub mod services;

#[cfg(test)]
mod testing;

pub use error::{MmError, MmResult};

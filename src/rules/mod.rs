//! Merchant grouping and MoneyMoney rule suggestions

pub mod merchant;
pub mod suggest;

pub use merchant::{group_by_merchant, merchant_key, normalize_name};
pub use suggest::{suggest_rules, Confidence, RuleSuggestion, SampleTransaction};

//! Financial analysis over exported transactions
//!
//! Every function here is pure: callers load accounts, categories and
//! transactions from MoneyMoney, drop internal transfers with
//! [`TransferDetector`], and pass slices in. Date-dependent functions take
//! `today` explicitly.

pub mod balance;
pub mod cashflow;
pub mod merchants;
pub mod period;
pub mod recurring;
pub mod spending;
pub mod transfers;

pub use balance::{compute_balance_history, BalanceSnapshot};
pub use cashflow::{cashflow_start, compute_cashflow, CashflowPeriod, Granularity};
pub use merchants::{compute_merchant_summary, compute_top_customers, MerchantSummary, TypeFilter};
pub use period::{previous_period, DateRange, NamedPeriod};
pub use recurring::{detect_recurring, Frequency, RecurringTransaction};
pub use spending::{compute_spending, SpendingAnalysis};
pub use transfers::{transfer_category_ids, TransferDetector};

/// Round to one decimal place
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! MoneyMoney scripting bridge
//!
//! MoneyMoney exposes its data through AppleScript. Reads use the `export`
//! commands, which answer with XML property lists; writes are limited to
//! editing a transaction's category, checkmark and comment, and creating
//! SEPA transfers.
//!
//! # Example
//!
//! ```rust,ignore
//! use mm_cli::moneymoney::{MoneyMoney, TransactionQuery};
//!
//! let mm = MoneyMoney::connect();
//! let accounts = mm.accounts()?;
//! let transactions = mm.transactions(&TransactionQuery::new().account("Girokonto"))?;
//! ```

pub mod decode;
mod runner;
pub mod script;

use std::path::PathBuf;

pub use runner::{classify_failure, Osascript, ScriptRunner};
pub use script::TransactionQuery;

use crate::error::{MmError, MmResult};
use crate::export::ExportFormat;
use crate::models::{Account, Category, Portfolio, SepaTransfer, Transaction, TransferDestination};

/// AppleScript error number for a reference to a missing object
const ERR_NO_SUCH_OBJECT: &str = "-1728";

/// Client for the MoneyMoney scripting interface
pub struct MoneyMoney<R: ScriptRunner = Osascript> {
    runner: R,
    closed_groups: Vec<String>,
}

impl MoneyMoney<Osascript> {
    /// Talk to the local MoneyMoney app through `osascript`
    pub fn connect() -> Self {
        Self::new(Osascript::new())
    }
}

impl<R: ScriptRunner> MoneyMoney<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            closed_groups: Vec::new(),
        }
    }

    /// Account groups whose accounts are reported as closed
    pub fn with_closed_groups(mut self, groups: Vec<String>) -> Self {
        self.closed_groups = groups;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn export(&self, script: &str) -> MmResult<plist::Value> {
        let answer = self.runner.run(script)?;
        decode::read_answer(&answer)
    }

    pub fn accounts(&self) -> MmResult<Vec<Account>> {
        let value = self.export(&script::export_accounts())?;
        decode::accounts(&value, &self.closed_groups)
    }

    pub fn categories(&self) -> MmResult<Vec<Category>> {
        let value = self.export(&script::export_categories())?;
        decode::categories(&value)
    }

    pub fn transactions(&self, query: &TransactionQuery) -> MmResult<Vec<Transaction>> {
        let value = self.export(&script::export_transactions(query, None))?;
        decode::transactions(&value)
    }

    /// Export transactions as a bank statement file
    ///
    /// Returns the path of the temporary file MoneyMoney wrote.
    pub fn export_file(&self, query: &TransactionQuery, format: ExportFormat) -> MmResult<PathBuf> {
        let answer = self
            .runner
            .run(&script::export_transactions(query, Some(format)))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(MmError::Export(format!(
                "MoneyMoney returned no file for the {} export",
                format
            )));
        }
        Ok(PathBuf::from(answer))
    }

    /// Depot holdings, optionally for a single account
    pub fn portfolios(&self, account_id: Option<&str>) -> MmResult<Vec<Portfolio>> {
        let value = self.export(&script::export_portfolio(account_id))?;
        decode::portfolios(&value)
    }

    pub fn set_category(&self, transaction_id: &str, category_id: &str) -> MmResult<()> {
        self.edit(transaction_id, script::set_category(transaction_id, category_id)?)
    }

    pub fn set_checkmark(&self, transaction_id: &str, checked: bool) -> MmResult<()> {
        self.edit(transaction_id, script::set_checkmark(transaction_id, checked)?)
    }

    pub fn set_comment(&self, transaction_id: &str, comment: &str) -> MmResult<()> {
        self.edit(transaction_id, script::set_comment(transaction_id, comment)?)
    }

    fn edit(&self, transaction_id: &str, script: String) -> MmResult<()> {
        match self.runner.run(&script) {
            Ok(_) => Ok(()),
            Err(MmError::MoneyMoney(msg)) if msg.contains(ERR_NO_SUCH_OBJECT) => {
                Err(MmError::transaction_not_found(transaction_id.trim()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn create_transfer(
        &self,
        transfer: &SepaTransfer,
        destination: TransferDestination,
    ) -> MmResult<()> {
        self.runner
            .run(&script::create_bank_transfer(transfer, destination))
            .map(|_| ())
    }
}

/// Find a category by name: exact (case-insensitive) first, then substring
///
/// The substring fallback skips category groups, which cannot be assigned.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let needle = name.to_lowercase();
    categories
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .or_else(|| {
            categories
                .iter()
                .filter(|c| !c.group)
                .find(|c| c.name.to_lowercase().contains(&needle))
        })
}


#[cfg(test)]
mod tests {
    use super::decode::fixtures;
    use super::fake::FakeRunner;
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_accounts_marks_closed_groups() {
        let mm = MoneyMoney::new(FakeRunner::new().answer(fixtures::ACCOUNTS))
            .with_closed_groups(vec!["aufgelöst".into()]);

        let accounts = mm.accounts().unwrap();
        assert_eq!(accounts.iter().filter(|a| a.closed).count(), 1);
        assert_eq!(
            mm.runner().scripts(),
            vec!["tell application \"MoneyMoney\" to export accounts".to_string()]
        );
    }

    #[test]
    fn test_transactions_uses_query() {
        let mm = MoneyMoney::new(FakeRunner::new().answer(fixtures::TRANSACTIONS));
        let query = TransactionQuery::new().account("acc-giro");

        let transactions = mm.transactions(&query).unwrap();
        assert_eq!(transactions.len(), 2);
        assert!(mm.runner().scripts()[0].contains("from account \"acc-giro\" as \"plist\""));
    }

    #[test]
    fn test_export_file_returns_path() {
        let mm = MoneyMoney::new(FakeRunner::new().answer("/tmp/MoneyMoney/export.sta\n"));
        let path = mm
            .export_file(&TransactionQuery::new(), ExportFormat::Sta)
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/MoneyMoney/export.sta"));
    }

    #[test]
    fn test_export_file_empty_answer() {
        let mm = MoneyMoney::new(FakeRunner::new().answer(""));
        let err = mm
            .export_file(&TransactionQuery::new(), ExportFormat::Ofx)
            .unwrap_err();
        assert!(matches!(err, MmError::Export(_)));
    }

    #[test]
    fn test_portfolios() {
        let mm = MoneyMoney::new(FakeRunner::new().answer(fixtures::PORTFOLIO));
        let portfolios = mm.portfolios(Some("depot-uuid-1")).unwrap();
        assert_eq!(portfolios[0].total_value, Money::from_cents(657500));
        assert!(mm.runner().scripts()[0].ends_with("of account id \"depot-uuid-1\""));
    }

    #[test]
    fn test_set_checkmark_sends_script() {
        let mm = MoneyMoney::new(FakeRunner::new());
        mm.set_checkmark("12345", true).unwrap();
        assert_eq!(
            mm.runner().scripts(),
            vec![
                "tell application \"MoneyMoney\" to set transaction id 12345 checkmark to \"on\""
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_unknown_transaction_is_not_found() {
        let mm = MoneyMoney::new(FakeRunner::new().fail(MmError::MoneyMoney(
            "MoneyMoney got an error: Can’t get transaction id 99. (-1728)".into(),
        )));
        let err = mm.set_comment("99", "note").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Transaction not found: 99");
    }

    #[test]
    fn test_invalid_id_never_reaches_moneymoney() {
        let mm = MoneyMoney::new(FakeRunner::new());
        assert!(mm.set_category("abc", "cat-food").is_err());
        assert!(mm.runner().scripts().is_empty());
    }

    #[test]
    fn test_not_running_propagates() {
        let mm = MoneyMoney::new(FakeRunner::new().fail(MmError::NotRunning));
        assert!(matches!(mm.categories(), Err(MmError::NotRunning)));
    }

    #[test]
    fn test_find_category_exact_before_partial() {
        let mm = MoneyMoney::new(FakeRunner::new().answer(fixtures::CATEGORIES));
        let categories = mm.categories().unwrap();

        let exact = find_category(&categories, "lebensmittel").unwrap();
        assert_eq!(exact.id, "cat-food");

        let group = find_category(&categories, "LEBENSHALTUNG").unwrap();
        assert_eq!(group.id, "cat-living");

        // "Lebenshaltung" is a group, so the partial match lands on its child
        let partial = find_category(&categories, "lebens").unwrap();
        assert_eq!(partial.id, "cat-food");

        assert!(find_category(&categories, "NonExistent").is_none());
    }
}

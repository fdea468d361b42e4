//! AppleScript command builders
//!
//! Every command is a single `tell application "MoneyMoney" to ...` line.
//! String arguments are escaped; transaction ids are checked to be numeric
//! since they are spliced in unquoted.

use chrono::NaiveDate;

use crate::error::{MmError, MmResult};
use crate::export::ExportFormat;
use crate::models::{SepaTransfer, TransferDestination};

const TELL: &str = "tell application \"MoneyMoney\" to";

/// Filter for `export transactions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Account UUID, IBAN or name
    pub account: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn from(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    pub fn to(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }
}

/// Escape a value for use inside an AppleScript string literal
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Check that a transaction id is a MoneyMoney numeric id
pub fn validate_transaction_id(id: &str) -> MmResult<&str> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(MmError::Validation(format!(
            "Invalid transaction id '{}': MoneyMoney transaction ids are numeric",
            id
        )));
    }
    Ok(id)
}

pub fn export_accounts() -> String {
    format!("{} export accounts", TELL)
}

pub fn export_categories() -> String {
    format!("{} export categories", TELL)
}

/// `export transactions` with an optional account and date range
///
/// `format` is `None` for the plist answer used internally.
pub fn export_transactions(query: &TransactionQuery, format: Option<ExportFormat>) -> String {
    let mut script = format!("{} export transactions", TELL);

    if let Some(account) = &query.account {
        script.push_str(&format!(" from account \"{}\"", escape(account)));
    }
    if let Some(from) = query.from {
        script.push_str(&format!(" from date \"{}\"", from.format("%Y-%m-%d")));
    }
    if let Some(to) = query.to {
        script.push_str(&format!(" to date \"{}\"", to.format("%Y-%m-%d")));
    }

    let format = format.map(|f| f.moneymoney_name()).unwrap_or("plist");
    script.push_str(&format!(" as \"{}\"", format));
    script
}

pub fn export_portfolio(account_id: Option<&str>) -> String {
    match account_id {
        Some(id) => format!("{} export portfolio of account id \"{}\"", TELL, escape(id)),
        None => format!("{} export portfolio", TELL),
    }
}

pub fn set_category(transaction_id: &str, category_id: &str) -> MmResult<String> {
    set_transaction_field(transaction_id, "category", category_id)
}

pub fn set_checkmark(transaction_id: &str, checked: bool) -> MmResult<String> {
    set_transaction_field(transaction_id, "checkmark", if checked { "on" } else { "off" })
}

pub fn set_comment(transaction_id: &str, comment: &str) -> MmResult<String> {
    set_transaction_field(transaction_id, "comment", comment)
}

fn set_transaction_field(transaction_id: &str, field: &str, value: &str) -> MmResult<String> {
    let id = validate_transaction_id(transaction_id)?;
    Ok(format!(
        "{} set transaction id {} {} to \"{}\"",
        TELL,
        id,
        field,
        escape(value)
    ))
}

/// `create bank transfer` for a validated SEPA transfer
pub fn create_bank_transfer(transfer: &SepaTransfer, destination: TransferDestination) -> String {
    let mut script = format!(
        "{} create bank transfer from account \"{}\" to \"{}\" iban \"{}\"",
        TELL,
        escape(&transfer.from_account),
        escape(&transfer.recipient),
        escape(&transfer.iban)
    );

    if let Some(bic) = &transfer.bic {
        script.push_str(&format!(" bic \"{}\"", escape(bic)));
    }

    script.push_str(&format!(
        " amount {} purpose \"{}\"",
        transfer.amount,
        escape(&transfer.purpose)
    ));

    if let Some(reference) = &transfer.reference {
        script.push_str(&format!(" endtoend reference \"{}\"", escape(reference)));
    }
    if let Some(date) = transfer.scheduled {
        script.push_str(&format!(" scheduled date \"{}\"", date.format("%Y-%m-%d")));
    }

    match destination {
        TransferDestination::Window => {}
        TransferDestination::Outbox => script.push_str(" into \"outbox\""),
        TransferDestination::Draft => script.push_str(" into \"draft\""),
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::testing::date;

    #[test]
    fn test_export_scripts() {
        assert_eq!(export_accounts(), "tell application \"MoneyMoney\" to export accounts");
        assert_eq!(
            export_portfolio(None),
            "tell application \"MoneyMoney\" to export portfolio"
        );
        assert!(export_portfolio(Some("test-uuid"))
            .ends_with("export portfolio of account id \"test-uuid\""));
    }

    #[test]
    fn test_export_transactions_script() {
        let query = TransactionQuery::new()
            .account("DE89370400440532013000")
            .from(Some(date("2026-01-01")))
            .to(Some(date("2026-01-31")));

        assert_eq!(
            export_transactions(&query, None),
            "tell application \"MoneyMoney\" to export transactions \
             from account \"DE89370400440532013000\" \
             from date \"2026-01-01\" to date \"2026-01-31\" as \"plist\""
        );
        assert!(export_transactions(&TransactionQuery::new(), Some(ExportFormat::Camt053))
            .ends_with("export transactions as \"camt.053\""));
    }

    #[test]
    fn test_set_checkmark_script() {
        assert_eq!(
            set_checkmark("12345", true).unwrap(),
            "tell application \"MoneyMoney\" to set transaction id 12345 checkmark to \"on\""
        );
        assert!(set_checkmark("12345", false).unwrap().ends_with("checkmark to \"off\""));
    }

    #[test]
    fn test_set_comment_escapes_quotes() {
        assert_eq!(
            set_comment("42", "Paid \"in full\"").unwrap(),
            "tell application \"MoneyMoney\" to set transaction id 42 comment to \"Paid \\\"in full\\\"\""
        );
        assert!(set_comment("42", "C:\\temp").unwrap().ends_with("\"C:\\\\temp\""));
    }

    #[test]
    fn test_transaction_id_must_be_numeric() {
        assert!(set_category("12a", "cat").is_err());
        assert!(set_category("1 to \"x\"", "cat").is_err());
        assert!(set_category("", "cat").unwrap_err().is_validation());
        assert!(set_category(" 7 ", "cat").unwrap().contains("transaction id 7 category"));
    }

    #[test]
    fn test_create_bank_transfer_script() {
        let transfer = SepaTransfer {
            from_account: "Girokonto".into(),
            recipient: "Max Mustermann".into(),
            iban: "DE89370400440532013000".into(),
            bic: Some("COBADEFFXXX".into()),
            amount: Money::from_cents(4250),
            purpose: "Rechnung 2026-17".into(),
            reference: Some("INV-17".into()),
            scheduled: Some(date("2026-02-01")),
        };

        assert_eq!(
            create_bank_transfer(&transfer, TransferDestination::Outbox),
            "tell application \"MoneyMoney\" to create bank transfer from account \"Girokonto\" \
             to \"Max Mustermann\" iban \"DE89370400440532013000\" bic \"COBADEFFXXX\" \
             amount 42.50 purpose \"Rechnung 2026-17\" endtoend reference \"INV-17\" \
             scheduled date \"2026-02-01\" into \"outbox\""
        );

        let minimal = SepaTransfer {
            bic: None,
            reference: None,
            scheduled: None,
            ..transfer
        };
        let script = create_bank_transfer(&minimal, TransferDestination::Window);
        assert!(script.ends_with("amount 42.50 purpose \"Rechnung 2026-17\""));
    }
}

//! SEPA transfer validation
//!
//! Everything a transfer needs is checked locally before MoneyMoney is
//! asked to create it: IBAN checksum, BIC shape, field lengths and the
//! source account.

use chrono::NaiveDate;

use crate::error::{MmError, MmResult};
use crate::models::{Account, Money, SepaTransfer};

use super::account::find_account;

const MAX_RECIPIENT_LEN: usize = 70;
const MAX_PURPOSE_LEN: usize = 140;
const MAX_REFERENCE_LEN: usize = 35;

/// Transfer as entered on the command line
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Source account id, IBAN or name
    pub from_account: String,
    pub recipient: String,
    pub iban: String,
    pub bic: Option<String>,
    pub amount: Money,
    pub purpose: String,
    pub reference: Option<String>,
    pub scheduled: Option<NaiveDate>,
}

impl TransferRequest {
    /// Check every field that does not need the account list
    pub fn validate(&self) -> MmResult<()> {
        validate_iban(&self.iban)?;
        if let Some(bic) = &self.bic {
            validate_bic(bic)?;
        }

        if !self.amount.is_positive() {
            return Err(MmError::Validation(
                "Transfer amount must be greater than zero".into(),
            ));
        }

        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(MmError::Validation("Recipient name cannot be empty".into()));
        }
        check_length("Recipient name", recipient, MAX_RECIPIENT_LEN)?;
        check_length("Purpose", &self.purpose, MAX_PURPOSE_LEN)?;
        if let Some(reference) = &self.reference {
            check_length("End-to-end reference", reference, MAX_REFERENCE_LEN)?;
        }

        Ok(())
    }

    /// Validate and resolve the source account into a transfer instruction
    pub fn prepare(&self, accounts: &[Account]) -> MmResult<SepaTransfer> {
        self.validate()?;

        let source = find_account(accounts, &self.from_account)?;
        if source.portfolio {
            return Err(MmError::Validation(format!(
                "Account '{}' is a portfolio and cannot send transfers",
                source.name
            )));
        }

        let from_account = if source.iban.is_empty() {
            source.name.clone()
        } else {
            source.iban.clone()
        };

        Ok(SepaTransfer {
            from_account,
            recipient: self.recipient.trim().to_string(),
            iban: normalize_iban(&self.iban),
            bic: self.bic.as_deref().map(normalize_iban),
            amount: self.amount,
            purpose: self.purpose.trim().to_string(),
            reference: self.reference.as_ref().map(|r| r.trim().to_string()),
            scheduled: self.scheduled,
        })
    }
}

fn check_length(field: &str, value: &str, max: usize) -> MmResult<()> {
    let len = value.trim().chars().count();
    if len > max {
        return Err(MmError::Validation(format!(
            "{} is too long ({} characters, maximum {})",
            field, len, max
        )));
    }
    Ok(())
}

/// Remove whitespace and uppercase
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// ISO 13616 structure and mod-97 checksum
pub fn validate_iban(iban: &str) -> MmResult<()> {
    let iban = normalize_iban(iban);
    let invalid = |reason: &str| MmError::Validation(format!("Invalid IBAN '{}': {}", iban, reason));

    if !(15..=34).contains(&iban.len()) {
        return Err(invalid("must be 15 to 34 characters long"));
    }
    if !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("only letters and digits are allowed"));
    }
    let (head, _) = iban.split_at(4);
    if !head[..2].chars().all(|c| c.is_ascii_uppercase())
        || !head[2..].chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("must start with a country code and check digits"));
    }

    let rearranged = iban[4..].chars().chain(iban[..4].chars());
    let mut remainder: u32 = 0;
    for c in rearranged {
        // A-Z map to 10-35
        let value = c.to_digit(36).unwrap_or(0);
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    if remainder != 1 {
        return Err(invalid("checksum mismatch"));
    }
    Ok(())
}

/// Eight or eleven letters and digits
pub fn validate_bic(bic: &str) -> MmResult<()> {
    let bic = normalize_iban(bic);
    let shape_ok = matches!(bic.len(), 8 | 11)
        && bic.chars().all(|c| c.is_ascii_alphanumeric())
        && bic[..6].chars().all(|c| c.is_ascii_alphabetic());
    if !shape_ok {
        return Err(MmError::Validation(format!(
            "Invalid BIC '{}': expected 8 or 11 letters and digits",
            bic
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, date};

    fn request() -> TransferRequest {
        TransferRequest {
            from_account: "Girokonto".into(),
            recipient: " Max Mustermann ".into(),
            iban: "de89 3704 0044 0532 0130 00".into(),
            bic: Some("cobadeffxxx".into()),
            amount: Money::from_cents(4250),
            purpose: "Rechnung 2026-001".into(),
            reference: Some("INV-2026-001".into()),
            scheduled: Some(date("2026-11-01")),
        }
    }

    #[test]
    fn test_valid_ibans() {
        assert!(validate_iban("DE89370400440532013000").is_ok());
        assert!(validate_iban("GB82 WEST 1234 5698 7654 32").is_ok());
        assert!(validate_iban("NL91ABNA0417164300").is_ok());
    }

    #[test]
    fn test_invalid_ibans() {
        assert!(validate_iban("DE89370400440532013001").is_err());
        assert!(validate_iban("DE8937040044").is_err());
        assert!(validate_iban("1289370400440532013000").is_err());
        assert!(validate_iban("DE89-3704-0044-0532-0130-00").is_err());
    }

    #[test]
    fn test_bic() {
        assert!(validate_bic("COBADEFF").is_ok());
        assert!(validate_bic("COBADEFFXXX").is_ok());
        assert!(validate_bic("COBADE").is_err());
        assert!(validate_bic("12BADEFF").is_err());
    }

    #[test]
    fn test_validate_field_limits() {
        let mut req = request();
        req.amount = Money::zero();
        assert!(req.validate().unwrap_err().is_validation());

        let mut req = request();
        req.recipient = "   ".into();
        assert!(req.validate().is_err());

        let mut req = request();
        req.purpose = "x".repeat(141);
        assert!(req.validate().is_err());

        let mut req = request();
        req.reference = Some("r".repeat(36));
        assert!(req.validate().is_err());

        let mut req = request();
        req.recipient = "n".repeat(70);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_prepare_resolves_source() {
        let accounts = vec![account("acc-1", "Girokonto", "DE02120300000000202051", "Privat", 0)];
        let transfer = request().prepare(&accounts).unwrap();

        assert_eq!(transfer.from_account, "DE02120300000000202051");
        assert_eq!(transfer.recipient, "Max Mustermann");
        assert_eq!(transfer.iban, "DE89370400440532013000");
        assert_eq!(transfer.bic.as_deref(), Some("COBADEFFXXX"));
        assert_eq!(transfer.amount, Money::from_cents(4250));
    }

    #[test]
    fn test_prepare_rejects_portfolio_and_unknown() {
        let mut depot = account("acc-1", "Girokonto", "", "Privat", 0);
        depot.portfolio = true;
        assert!(request().prepare(&[depot]).unwrap_err().is_validation());

        let err = request().prepare(&[]).unwrap_err();
        assert!(err.is_not_found());
    }
}

//! Shared builders for unit tests

use chrono::NaiveDate;

use crate::models::{Account, AccountType, Category, CategoryType, Money, Transaction};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Booked EUR transaction on account `acc-1` ("Giro")
pub fn tx(id: &str, booking_date: &str, cents: i64, name: &str) -> Transaction {
    Transaction {
        id: id.into(),
        account_id: "acc-1".into(),
        account_name: "Giro".into(),
        booking_date: date(booking_date),
        value_date: date(booking_date),
        amount: Money::from_cents(cents),
        currency: "EUR".into(),
        name: name.into(),
        purpose: String::new(),
        category_id: None,
        category_name: None,
        checkmark: false,
        comment: String::new(),
        booked: true,
        counterparty_iban: None,
    }
}

/// Transaction with a category assigned
pub fn categorized(
    id: &str,
    booking_date: &str,
    cents: i64,
    name: &str,
    category: &Category,
) -> Transaction {
    Transaction {
        category_id: Some(category.id.clone()),
        category_name: Some(category.name.clone()),
        ..tx(id, booking_date, cents, name)
    }
}

pub fn account(id: &str, name: &str, iban: &str, group: &str, balance_cents: i64) -> Account {
    Account {
        id: id.into(),
        name: name.into(),
        account_number: iban.into(),
        bank_name: "Testbank".into(),
        balance: Money::from_cents(balance_cents),
        currency: "EUR".into(),
        account_type: AccountType::Checking,
        owner: String::new(),
        iban: iban.into(),
        bic: String::new(),
        group: group.into(),
        portfolio: false,
        closed: false,
    }
}

/// Category at `path`; the name is the last path segment
pub fn category(id: &str, path: &str, category_type: CategoryType) -> Category {
    let segments: Vec<&str> = path.split('\\').collect();
    Category {
        id: id.into(),
        name: segments.last().copied().unwrap_or_default().into(),
        category_type,
        parent_id: None,
        parent_name: (segments.len() > 1).then(|| segments[segments.len() - 2].to_string()),
        budget: None,
        budget_period: None,
        budget_available: None,
        indentation: segments.len() - 1,
        group: false,
        rules: String::new(),
        path: path.into(),
    }
}

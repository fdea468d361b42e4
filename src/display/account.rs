//! Account display formatting

use super::{eur, table, titled, to_csv, to_json, to_yaml, OutputFormat};
use crate::error::MmResult;
use crate::models::{Account, Money};

/// Render the account list; `hierarchy` groups table rows by account group
pub fn render_accounts(accounts: &[Account], format: OutputFormat, hierarchy: bool) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(accounts),
        OutputFormat::Yaml => to_yaml(accounts),
        OutputFormat::Csv => to_csv(
            &["id", "name", "group", "bank_name", "balance", "currency", "account_type", "iban"],
            accounts
                .iter()
                .map(|a| {
                    vec![
                        a.id.clone(),
                        a.name.clone(),
                        a.group.clone(),
                        a.bank_name.clone(),
                        a.balance.to_string(),
                        a.currency.clone(),
                        a.account_type.to_string(),
                        a.iban.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let body = if hierarchy {
                hierarchy_table(accounts)
            } else {
                flat_table(accounts)
            };
            Ok(format!(
                "{}\n\nTotal (EUR): {}",
                titled("Accounts", body),
                eur(eur_total(accounts.iter()))
            ))
        }
    }
}

fn eur_total<'a>(accounts: impl Iterator<Item = &'a Account>) -> Money {
    accounts
        .filter(|a| a.currency == "EUR")
        .map(|a| a.balance)
        .sum()
}

fn dash_if_empty(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

fn flat_table(accounts: &[Account]) -> String {
    let rows = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                dash_if_empty(&a.group),
                a.bank_name.clone(),
                a.account_type.to_string(),
                a.balance.format_currency(&a.currency),
                dash_if_empty(&a.iban),
            ]
        })
        .collect();
    table(&["Name", "Group", "Bank", "Type", "Balance", "IBAN"], rows, &[4])
}

struct Section<'a> {
    name: &'a str,
    accounts: Vec<&'a Account>,
}

/// Accounts grouped by section in first-seen order
fn sections(accounts: &[Account]) -> Vec<Section<'_>> {
    let mut sections: Vec<Section> = Vec::new();
    for account in accounts {
        let name = if account.group.is_empty() {
            "(Ungrouped)"
        } else {
            account.group.as_str()
        };
        match sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.accounts.push(account),
            None => sections.push(Section {
                name,
                accounts: vec![account],
            }),
        }
    }
    sections
}

fn hierarchy_table(accounts: &[Account]) -> String {
    let mut rows = Vec::new();
    for section in sections(accounts) {
        rows.push(vec![
            section.name.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]);
        for a in &section.accounts {
            rows.push(vec![
                format!("  {}", a.name),
                a.bank_name.clone(),
                a.account_type.to_string(),
                a.balance.format_currency(&a.currency),
                dash_if_empty(&a.iban),
            ]);
        }
        rows.push(vec![
            "  Subtotal".to_string(),
            String::new(),
            String::new(),
            eur(eur_total(section.accounts.iter().copied())),
            String::new(),
        ]);
    }
    table(&["Name", "Bank", "Type", "Balance", "IBAN"], rows, &[3])
}

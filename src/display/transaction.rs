//! Transaction display formatting

use super::{eur, table, titled, to_csv, to_json, to_yaml, truncate, OutputFormat};
use crate::error::MmResult;
use crate::models::{Money, Transaction};

pub fn render_transactions(transactions: &[Transaction], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(transactions),
        OutputFormat::Yaml => to_yaml(transactions),
        OutputFormat::Csv => to_csv(
            &[
                "id",
                "booking_date",
                "value_date",
                "name",
                "purpose",
                "amount",
                "currency",
                "category",
                "account",
                "checkmark",
                "comment",
            ],
            transactions
                .iter()
                .map(|tx| {
                    vec![
                        tx.id.clone(),
                        tx.booking_date.to_string(),
                        tx.value_date.to_string(),
                        tx.name.clone(),
                        tx.purpose.clone(),
                        tx.amount.to_string(),
                        tx.currency.clone(),
                        tx.category_name.clone().unwrap_or_default(),
                        tx.account_name.clone(),
                        tx.checkmark.to_string(),
                        tx.comment.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = transactions
                .iter()
                .map(|tx| {
                    vec![
                        tx.id.clone(),
                        tx.booking_date.to_string(),
                        truncate(&tx.name, 30),
                        truncate(&tx.purpose, 40),
                        tx.amount.format_currency(&tx.currency),
                        tx.category_name.clone().unwrap_or_else(|| "-".into()),
                        tx.account_name.clone(),
                        if tx.checkmark { "✓".into() } else { String::new() },
                    ]
                })
                .collect();

            let body = table(
                &["ID", "Date", "Name", "Purpose", "Amount", "Category", "Account", "✓"],
                rows,
                &[4],
            );
            Ok(format!("{}\n\n{}", titled("Transactions", body), summary(transactions)))
        }
    }
}

fn summary(transactions: &[Transaction]) -> String {
    let income: Money = transactions
        .iter()
        .filter(|tx| tx.is_income())
        .map(|tx| tx.amount)
        .sum();
    let expenses: Money = transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .map(|tx| tx.amount)
        .sum();

    format!(
        "Summary:\n  Transactions: {}\n  Income: {}\n  Expenses: {}\n  Net: {}",
        transactions.len(),
        eur(income),
        eur(expenses),
        eur(income + expenses)
    )
}

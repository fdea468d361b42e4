//! Display formatting for terminal output
//!
//! Every renderer returns a `String` for the selected [`OutputFormat`]:
//! box-drawn tables with a summary for people, and JSON, CSV or YAML for
//! scripts. Status messages go to stderr so that piped output stays clean.

pub mod account;
pub mod analysis;
pub mod audit;
pub mod category;
pub mod portfolio;
pub mod suggestion;
pub mod transaction;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::error::{MmError, MmResult};
use crate::models::Money;

pub use account::render_accounts;
pub use analysis::{
    render_balance_history, render_cashflow, render_merchants, render_recurring, render_spending,
    render_top_customers,
};
pub use audit::render_audit_log;
pub use category::{render_categories, render_category_usage};
pub use portfolio::render_portfolios;
pub use suggestion::render_suggestions;
pub use transaction::render_transactions;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(data: &T) -> MmResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| MmError::Json(format!("Failed to serialize output: {}", e)))
}

pub fn to_yaml<T: Serialize + ?Sized>(data: &T) -> MmResult<String> {
    serde_yaml::to_string(data)
        .map_err(|e| MmError::Yaml(format!("Failed to serialize output: {}", e)))
}

/// CSV with a header row
pub fn to_csv(headers: &[&str], rows: Vec<Vec<String>>) -> MmResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| MmError::Csv(format!("Failed to finish CSV output: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| MmError::Csv(e.to_string()))
}

/// Rounded box table; `right` lists right-aligned column indices
pub(crate) fn table(headers: &[&str], rows: Vec<Vec<String>>, right: &[usize]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for &column in right {
        table.modify(Columns::single(column), Alignment::right());
    }
    table.to_string()
}

/// Table with a title line above it
pub(crate) fn titled(title: &str, body: String) -> String {
    format!("{}\n{}", title, body)
}

/// `1,234.56 €` for EUR amounts in tables
pub(crate) fn eur(amount: Money) -> String {
    amount.format_currency("EUR")
}

pub(crate) fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

/// Cut a string to `max` characters, appending `…` when shortened
pub(crate) fn truncate(s: &str, max: usize) -> String {
    let flat = s.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() <= max {
        return flat.to_string();
    }
    let mut out: String = flat.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn success(message: &str) {
    eprintln!("✓ {}", message);
}

pub fn warning(message: &str) {
    eprintln!("! {}", message);
}

pub fn info(message: &str) {
    eprintln!("ℹ {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_csv() {
        let csv = to_csv(
            &["name", "amount"],
            vec![
                vec!["REWE".into(), "-12.99".into()],
                vec!["Müller, Max".into(), "5.00".into()],
            ],
        )
        .unwrap();
        assert_eq!(csv, "name,amount\nREWE,-12.99\n\"Müller, Max\",5.00\n");
    }

    #[test]
    fn test_table_contains_cells() {
        let out = table(&["A", "B"], vec![vec!["x".into(), "1.00".into()]], &[1]);
        assert!(out.contains("A"));
        assert!(out.contains("1.00"));
        assert!(out.starts_with('╭'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::Yaml).unwrap(), "\"yaml\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}

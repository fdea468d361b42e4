//! Category display formatting

use super::{eur, table, titled, to_csv, to_json, to_yaml, truncate, OutputFormat};
use crate::error::MmResult;
use crate::models::Category;
use crate::services::CategoryUsage;

/// Render the category tree; table rows are indented by depth
pub fn render_categories(categories: &[Category], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(categories),
        OutputFormat::Yaml => to_yaml(categories),
        OutputFormat::Csv => to_csv(
            &["id", "name", "path", "category_type", "parent_name", "group", "rules"],
            categories
                .iter()
                .map(|c| {
                    vec![
                        c.id.clone(),
                        c.name.clone(),
                        c.path.clone(),
                        c.category_type.to_string(),
                        c.parent_name.clone().unwrap_or_default(),
                        c.group.to_string(),
                        c.rules.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = categories
                .iter()
                .map(|c| {
                    vec![
                        format!("{}{}", "  ".repeat(c.indentation), c.name),
                        truncate(&c.rules, 40),
                        short_id(&c.id),
                    ]
                })
                .collect();

            let groups = categories.iter().filter(|c| c.group).count();
            Ok(format!(
                "{}\n\nTotal: {} categories ({} groups, {} leaf)",
                titled("Categories", table(&["Name", "Rules", "ID"], rows, &[])),
                categories.len(),
                groups,
                categories.len() - groups
            ))
        }
    }
}

fn short_id(id: &str) -> String {
    if id.chars().count() > 8 {
        format!("{}...", id.chars().take(8).collect::<String>())
    } else {
        id.to_string()
    }
}

pub fn render_category_usage(usage: &[CategoryUsage], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(usage),
        OutputFormat::Yaml => to_yaml(usage),
        OutputFormat::Csv => to_csv(
            &["category_id", "category_name", "category_type", "transaction_count", "total_amount"],
            usage
                .iter()
                .map(|u| {
                    vec![
                        u.category_id.clone(),
                        u.category_name.clone(),
                        u.category_type.to_string(),
                        u.transaction_count.to_string(),
                        u.total_amount.to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = usage
                .iter()
                .enumerate()
                .map(|(i, u)| {
                    vec![
                        (i + 1).to_string(),
                        u.category_name.clone(),
                        u.category_type.to_string(),
                        u.transaction_count.to_string(),
                        eur(u.total_amount),
                    ]
                })
                .collect();
            Ok(titled(
                "Category Usage",
                table(
                    &["#", "Category", "Type", "Transactions", "Total Amount"],
                    rows,
                    &[0, 3, 4],
                ),
            ))
        }
    }
}

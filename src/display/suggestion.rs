//! Rule suggestion formatting

use super::{eur, table, titled, to_csv, to_json, to_yaml, truncate, OutputFormat};
use crate::error::MmResult;
use crate::rules::suggest::NEEDS_MANUAL_ASSIGNMENT;
use crate::rules::RuleSuggestion;

/// Render suggestions; table output splits new rules from already covered patterns
pub fn render_suggestions(suggestions: &[RuleSuggestion], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(suggestions),
        OutputFormat::Yaml => to_yaml(suggestions),
        OutputFormat::Csv => to_csv(
            &[
                "pattern",
                "suggested_category",
                "category_path",
                "match_count",
                "total_amount",
                "confidence",
                "existing_rule",
            ],
            suggestions
                .iter()
                .map(|s| {
                    vec![
                        s.pattern.clone(),
                        s.suggested_category.clone(),
                        s.category_path.clone(),
                        s.match_count.to_string(),
                        s.total_amount.to_string(),
                        s.confidence.to_string(),
                        s.existing_rule.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => Ok(render_table(suggestions)),
    }
}

fn render_table(suggestions: &[RuleSuggestion]) -> String {
    let (covered, open): (Vec<&RuleSuggestion>, Vec<&RuleSuggestion>) =
        suggestions.iter().partition(|s| s.is_covered());

    let mut sections = Vec::new();

    if !open.is_empty() {
        let rows = open
            .iter()
            .map(|s| {
                vec![
                    truncate(&s.pattern, 35),
                    s.suggested_category.clone(),
                    truncate(&s.category_path, 35),
                    s.match_count.to_string(),
                    eur(s.total_amount),
                    s.confidence.to_string(),
                    s.sample_transactions
                        .iter()
                        .take(2)
                        .map(|t| format!("{} {}", t.date, t.amount))
                        .collect::<Vec<_>>()
                        .join(" | "),
                ]
            })
            .collect();
        sections.push(titled(
            "Suggested New Rules",
            table(
                &["Pattern", "Category", "Path", "#", "Total", "Conf.", "Samples"],
                rows,
                &[3, 4],
            ),
        ));
    }

    if !covered.is_empty() {
        let rows = covered
            .iter()
            .map(|s| {
                vec![
                    truncate(&s.pattern, 35),
                    s.existing_category.clone().unwrap_or_default(),
                    s.match_count.to_string(),
                    truncate(s.existing_rule.as_deref().unwrap_or_default(), 50),
                ]
            })
            .collect();
        sections.push(titled(
            "Already Covered by Existing Rules",
            table(&["Pattern", "Existing Category", "#", "Existing Rule"], rows, &[2]),
        ));
    }

    let total: usize = suggestions.iter().map(|s| s.match_count).sum();
    let covered_count: usize = covered.iter().map(|s| s.match_count).sum();
    let manual: usize = open
        .iter()
        .filter(|s| s.suggested_category == NEEDS_MANUAL_ASSIGNMENT)
        .map(|s| s.match_count)
        .sum();
    let matchable = total - covered_count - manual;

    sections.push(format!(
        "Summary:\n  Uncategorized transactions: {}\n  Covered by existing rules: {}\n  Matchable with new rules: {}\n  Need manual categorization: {}",
        total, covered_count, matchable, manual
    ));

    sections.join("\n\n")
}

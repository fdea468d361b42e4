//! Analysis result formatting

use super::{eur, optional, table, titled, to_csv, to_json, to_yaml, truncate, OutputFormat};
use crate::analysis::{
    round_tenths, BalanceSnapshot, CashflowPeriod, MerchantSummary, RecurringTransaction,
    SpendingAnalysis,
};
use crate::error::MmResult;
use crate::models::Money;

fn plain(value: Option<Money>) -> String {
    value.map(|m| m.to_string()).unwrap_or_default()
}

fn plain_f64(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_default()
}

/// Spending per category for the period named `label`
///
/// `compare_label` names the comparison period in the table header.
pub fn render_spending(
    results: &[SpendingAnalysis],
    label: &str,
    compare_label: Option<&str>,
    format: OutputFormat,
) -> MmResult<String> {
    let has_compare = results.iter().any(|r| r.compare_actual.is_some());

    match format {
        OutputFormat::Json => to_json(results),
        OutputFormat::Yaml => to_yaml(results),
        OutputFormat::Csv => {
            let mut headers = vec![
                "category_name",
                "category_path",
                "category_type",
                "actual",
                "budget",
                "budget_period",
                "remaining",
                "percent_used",
                "transaction_count",
            ];
            if has_compare {
                headers.extend(["compare_actual", "compare_change"]);
            }
            let rows = results
                .iter()
                .map(|r| {
                    let mut row = vec![
                        r.category_name.clone(),
                        r.category_path.clone(),
                        r.category_type.to_string(),
                        r.actual.to_string(),
                        plain(r.budget),
                        r.budget_period.clone().unwrap_or_default(),
                        plain(r.remaining),
                        plain_f64(r.percent_used),
                        r.transaction_count.to_string(),
                    ];
                    if has_compare {
                        row.push(plain(r.compare_actual));
                        row.push(plain_f64(r.compare_change));
                    }
                    row
                })
                .collect();
            to_csv(&headers, rows)
        }
        OutputFormat::Table => {
            let has_budget = results.iter().any(|r| r.budget.is_some());
            let compare_header = format!("vs. {}", compare_label.unwrap_or("Prev"));

            let mut headers = vec!["Category", "Actual", "#"];
            if has_budget {
                headers.extend(["Budget", "Remaining", "Used%"]);
            }
            if has_compare {
                headers.push(compare_header.as_str());
            }

            let rows = results
                .iter()
                .map(|r| {
                    let mut row = vec![
                        r.category_name.clone(),
                        eur(r.actual),
                        r.transaction_count.to_string(),
                    ];
                    if has_budget {
                        row.push(optional(r.budget.map(eur)));
                        row.push(optional(r.remaining.map(eur)));
                        row.push(optional(r.percent_used.map(|p| format!("{:.1}%", p))));
                    }
                    if has_compare {
                        row.push(match r.compare_change {
                            Some(change) if change > 0.0 => format!("+{:.1}%", change),
                            Some(change) => format!("{:.1}%", change),
                            None => "new".to_string(),
                        });
                    }
                    row
                })
                .collect();

            let right: Vec<usize> = (1..headers.len()).collect();
            let body = table(&headers, rows, &right);
            Ok(format!(
                "{}\n\n{}",
                titled(&format!("Spending Analysis: {}", label), body),
                spending_summary(results)
            ))
        }
    }
}

fn spending_summary(results: &[SpendingAnalysis]) -> String {
    let expenses: Money = results
        .iter()
        .filter(|r| r.actual.is_negative())
        .map(|r| r.actual)
        .sum();
    let income: Money = results
        .iter()
        .filter(|r| r.actual.is_positive())
        .map(|r| r.actual)
        .sum();

    let mut out = format!(
        "Summary:\n  Expenses: {}\n  Income:   {}\n  Net:      {}",
        eur(expenses),
        eur(income),
        eur(income + expenses)
    );

    let budgeted: Vec<&SpendingAnalysis> = results.iter().filter(|r| r.budget.is_some()).collect();
    if !budgeted.is_empty() {
        let total_budget: Money = budgeted.iter().filter_map(|r| r.budget).sum();
        let total_spent: Money = budgeted.iter().map(|r| r.actual.abs()).sum();
        let pct = round_tenths(total_spent.to_f64() / total_budget.to_f64() * 100.0);
        out.push_str(&format!(
            "\n  Budget: {} of {} ({:.1}%)",
            eur(total_spent),
            eur(total_budget),
            pct
        ));

        let over = budgeted.iter().filter(|r| r.is_over_budget()).count();
        if over > 0 {
            out.push_str(&format!("\n  {} categories over budget", over));
        }
    }
    out
}

pub fn render_cashflow(periods: &[CashflowPeriod], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(periods),
        OutputFormat::Yaml => to_yaml(periods),
        OutputFormat::Csv => to_csv(
            &["period", "income", "expenses", "net", "transaction_count"],
            periods
                .iter()
                .map(|p| {
                    vec![
                        p.period.clone(),
                        p.income.to_string(),
                        p.expenses.to_string(),
                        p.net.to_string(),
                        p.transaction_count.to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = periods
                .iter()
                .map(|p| {
                    vec![
                        p.period.clone(),
                        eur(p.income),
                        eur(p.expenses),
                        eur(p.net),
                        p.transaction_count.to_string(),
                    ]
                })
                .collect();

            let income: Money = periods.iter().map(|p| p.income).sum();
            let expenses: Money = periods.iter().map(|p| p.expenses).sum();
            let count = periods.len().max(1) as f64;
            let avg_net = Money::from_f64((income + expenses).to_f64() / count);

            Ok(format!(
                "{}\n\nSummary:\n  Income:   {}\n  Expenses: {}\n  Net:      {}\n  Avg net per period: {}",
                titled(
                    "Cashflow",
                    table(&["Period", "Income", "Expenses", "Net", "#"], rows, &[1, 2, 3, 4])
                ),
                eur(income),
                eur(expenses),
                eur(income + expenses),
                eur(avg_net)
            ))
        }
    }
}

pub fn render_recurring(items: &[RecurringTransaction], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Yaml => to_yaml(items),
        OutputFormat::Csv => to_csv(
            &[
                "merchant_name",
                "category_name",
                "avg_amount",
                "frequency",
                "occurrence_count",
                "total_annual_cost",
                "last_date",
                "amount_variance",
            ],
            items
                .iter()
                .map(|r| {
                    vec![
                        r.merchant_name.clone(),
                        r.category_name.clone(),
                        r.avg_amount.to_string(),
                        r.frequency.to_string(),
                        r.occurrence_count.to_string(),
                        r.total_annual_cost.to_string(),
                        r.last_date.to_string(),
                        r.amount_variance.to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = items
                .iter()
                .map(|r| {
                    vec![
                        truncate(&r.merchant_name, 30),
                        r.category_name.clone(),
                        eur(r.avg_amount),
                        r.frequency.to_string(),
                        r.occurrence_count.to_string(),
                        eur(r.total_annual_cost),
                        r.last_date.to_string(),
                    ]
                })
                .collect();

            let annual: Money = items.iter().map(|r| r.total_annual_cost).sum();
            Ok(format!(
                "{}\n\nTotal annual cost: {} ({} recurring payments)",
                titled(
                    "Recurring Transactions",
                    table(
                        &["Merchant", "Category", "Avg Amount", "Frequency", "#", "Annual Cost", "Last"],
                        rows,
                        &[2, 4, 5],
                    )
                ),
                eur(annual),
                items.len()
            ))
        }
    }
}

fn merchant_rows(items: &[MerchantSummary], with_share: bool) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|m| {
            let mut row = vec![
                truncate(&m.merchant_name, 30),
                m.transaction_count.to_string(),
                eur(m.total_amount),
                eur(m.avg_amount),
            ];
            if with_share {
                row.push(optional(m.pct_of_total.map(|p| format!("{:.1}%", p))));
            }
            row.push(truncate(&m.categories.join(", "), 30));
            row.push(format!("{} – {}", m.first_date, m.last_date));
            row
        })
        .collect()
}

fn merchant_csv(items: &[MerchantSummary], with_share: bool) -> MmResult<String> {
    let mut headers = vec![
        "merchant_name",
        "transaction_count",
        "total_amount",
        "avg_amount",
    ];
    if with_share {
        headers.push("pct_of_total");
    }
    headers.extend(["categories", "first_date", "last_date"]);

    let rows = items
        .iter()
        .map(|m| {
            let mut row = vec![
                m.merchant_name.clone(),
                m.transaction_count.to_string(),
                m.total_amount.to_string(),
                m.avg_amount.to_string(),
            ];
            if with_share {
                row.push(plain_f64(m.pct_of_total));
            }
            row.extend([
                m.categories.join("; "),
                m.first_date.to_string(),
                m.last_date.to_string(),
            ]);
            row
        })
        .collect();
    to_csv(&headers, rows)
}

pub fn render_merchants(items: &[MerchantSummary], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Yaml => to_yaml(items),
        OutputFormat::Csv => merchant_csv(items, false),
        OutputFormat::Table => Ok(titled(
            "Merchants",
            table(
                &["Merchant", "#", "Total", "Average", "Categories", "Period"],
                merchant_rows(items, false),
                &[1, 2, 3],
            ),
        )),
    }
}

pub fn render_top_customers(items: &[MerchantSummary], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Yaml => to_yaml(items),
        OutputFormat::Csv => merchant_csv(items, true),
        OutputFormat::Table => {
            let total: Money = items.iter().map(|m| m.total_amount).sum();
            Ok(format!(
                "{}\n\nTotal income from listed customers: {}",
                titled(
                    "Top Customers",
                    table(
                        &["Customer", "#", "Total", "Average", "Share", "Categories", "Period"],
                        merchant_rows(items, true),
                        &[1, 2, 3, 4],
                    )
                ),
                eur(total)
            ))
        }
    }
}

pub fn render_balance_history(snapshots: &[BalanceSnapshot], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(snapshots),
        OutputFormat::Yaml => to_yaml(snapshots),
        OutputFormat::Csv => to_csv(
            &["period", "account_name", "balance", "change"],
            snapshots
                .iter()
                .map(|s| {
                    vec![
                        s.period.clone(),
                        s.account_name.clone(),
                        s.balance.to_string(),
                        s.change.to_string(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            let rows = snapshots
                .iter()
                .map(|s| {
                    let change = if s.change.is_positive() {
                        format!("+{}", eur(s.change))
                    } else {
                        eur(s.change)
                    };
                    vec![s.period.clone(), s.account_name.clone(), eur(s.balance), change]
                })
                .collect();
            Ok(titled(
                "Balance History",
                table(&["Month", "Account", "Balance", "Change"], rows, &[2, 3]),
            ))
        }
    }
}

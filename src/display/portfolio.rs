//! Portfolio display formatting

use super::{eur, table, titled, to_csv, to_json, to_yaml, truncate, OutputFormat};
use crate::error::MmResult;
use crate::models::{Money, Portfolio};

/// One table per depot; CSV flattens to one row per security
pub fn render_portfolios(portfolios: &[Portfolio], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(portfolios),
        OutputFormat::Yaml => to_yaml(portfolios),
        OutputFormat::Csv => to_csv(
            &[
                "account_name",
                "name",
                "isin",
                "quantity",
                "purchase_price",
                "current_price",
                "currency",
                "market_value",
                "gain_loss",
                "gain_loss_percent",
                "asset_class",
            ],
            portfolios
                .iter()
                .flat_map(|p| {
                    p.securities.iter().map(move |s| {
                        vec![
                            p.account_name.clone(),
                            s.name.clone(),
                            s.isin.clone(),
                            s.quantity.to_string(),
                            format!("{:.2}", s.purchase_price),
                            format!("{:.2}", s.current_price),
                            s.currency.clone(),
                            s.market_value.to_string(),
                            s.gain_loss.to_string(),
                            format!("{:.1}", s.gain_loss_percent),
                            s.asset_class.clone(),
                        ]
                    })
                })
                .collect(),
        ),
        OutputFormat::Table => {
            if portfolios.is_empty() {
                return Ok("No portfolios found.".to_string());
            }

            let mut sections: Vec<String> = portfolios.iter().map(portfolio_table).collect();

            let total_value: Money = portfolios.iter().map(|p| p.total_value).sum();
            let total_gain: Money = portfolios.iter().map(|p| p.total_gain_loss).sum();
            sections.push(format!(
                "Total value: {}\nTotal gain/loss: {}",
                eur(total_value),
                signed(total_gain)
            ));
            Ok(sections.join("\n\n"))
        }
    }
}

fn signed(amount: Money) -> String {
    if amount.is_positive() {
        format!("+{}", eur(amount))
    } else {
        eur(amount)
    }
}

fn portfolio_table(portfolio: &Portfolio) -> String {
    let rows = portfolio
        .securities
        .iter()
        .map(|s| {
            vec![
                truncate(&s.name, 35),
                s.isin.clone(),
                format!("{:.4}", s.quantity)
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .to_string(),
                format!("{:.2}", s.purchase_price),
                format!("{:.2}", s.current_price),
                s.market_value.format_currency(&s.currency),
                signed(s.gain_loss),
                format!("{:+.1}%", s.gain_loss_percent),
            ]
        })
        .collect();

    titled(
        &format!(
            "{} ({}, {})",
            portfolio.account_name,
            eur(portfolio.total_value),
            signed(portfolio.total_gain_loss)
        ),
        table(
            &["Name", "ISIN", "Quantity", "Buy Price", "Price", "Value", "Gain/Loss", "%"],
            rows,
            &[2, 3, 4, 5, 6, 7],
        ),
    )
}

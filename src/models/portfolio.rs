//! Portfolio (depot) holdings

use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single security position in a depot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub name: String,

    #[serde(default)]
    pub isin: String,

    pub quantity: f64,

    /// Average purchase price per unit
    pub purchase_price: f64,

    /// Latest price per unit
    pub current_price: f64,

    pub currency: String,

    pub market_value: Money,

    /// Market value minus cost basis
    pub gain_loss: Money,

    /// Gain or loss relative to cost basis, in percent
    pub gain_loss_percent: f64,

    #[serde(default)]
    pub asset_class: String,
}

impl Security {
    /// Build a position, deriving gain/loss from the cost basis
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        isin: impl Into<String>,
        quantity: f64,
        purchase_price: f64,
        current_price: f64,
        currency: impl Into<String>,
        market_value: Money,
        asset_class: impl Into<String>,
    ) -> Self {
        let cost_basis = Money::from_f64(quantity * purchase_price);
        let gain_loss = market_value - cost_basis;
        let gain_loss_percent = if cost_basis.is_zero() {
            0.0
        } else {
            round1(gain_loss.to_f64() / cost_basis.to_f64().abs() * 100.0)
        };

        Self {
            name: name.into(),
            isin: isin.into(),
            quantity,
            purchase_price,
            current_price,
            currency: currency.into(),
            market_value,
            gain_loss,
            gain_loss_percent,
            asset_class: asset_class.into(),
        }
    }

    pub fn cost_basis(&self) -> Money {
        self.market_value - self.gain_loss
    }
}

/// Holdings of one depot account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub account_name: String,

    pub account_id: String,

    pub securities: Vec<Security>,

    pub total_value: Money,

    pub total_gain_loss: Money,
}

impl Portfolio {
    pub fn new(
        account_name: impl Into<String>,
        account_id: impl Into<String>,
        securities: Vec<Security>,
    ) -> Self {
        let total_value = securities.iter().map(|s| s.market_value).sum();
        let total_gain_loss = securities.iter().map(|s| s.gain_loss).sum();

        Self {
            account_name: account_name.into(),
            account_id: account_id.into(),
            securities,
            total_value,
            total_gain_loss,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etf() -> Security {
        Security::new(
            "iShares Core MSCI World",
            "IE00B4L5Y983",
            10.0,
            70.0,
            85.5,
            "EUR",
            Money::from_cents(85500),
            "Equity",
        )
    }

    #[test]
    fn test_gain_loss() {
        let security = etf();
        assert_eq!(security.gain_loss, Money::from_cents(15500));
        assert_eq!(security.cost_basis(), Money::from_cents(70000));
        assert_eq!(security.gain_loss_percent, 22.1);
    }

    #[test]
    fn test_zero_cost_basis() {
        let gift = Security::new("Gift", "", 1.0, 0.0, 10.0, "EUR", Money::from_cents(1000), "");
        assert_eq!(gift.gain_loss, Money::from_cents(1000));
        assert_eq!(gift.gain_loss_percent, 0.0);
    }

    #[test]
    fn test_portfolio_totals() {
        let loser = Security::new("Loser", "", 5.0, 20.0, 10.0, "EUR", Money::from_cents(5000), "");
        let portfolio = Portfolio::new("Depot", "dep-1", vec![etf(), loser]);

        assert_eq!(portfolio.total_value, Money::from_cents(90500));
        assert_eq!(portfolio.total_gain_loss, Money::from_cents(10500));
    }
}

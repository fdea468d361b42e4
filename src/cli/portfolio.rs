//! Portfolio CLI command

use clap::Args;

use super::{emit, Context, OutputArgs};
use crate::display::{self, render_portfolios};
use crate::error::{MmError, MmResult};
use crate::moneymoney::ScriptRunner;
use crate::services::find_account;

#[derive(Args, Debug, Clone, Default)]
pub struct PortfolioArgs {
    /// Depot account ID, IBAN or name [default: all depots]
    #[arg(short, long)]
    pub account: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Show depot holdings
pub fn handle_portfolio_command<R: ScriptRunner>(ctx: &Context<R>, args: PortfolioArgs) -> MmResult<()> {
    let account_id = match &args.account {
        Some(key) => {
            let accounts = ctx.mm.accounts()?;
            let account = find_account(&accounts, key)?;
            if !account.portfolio {
                return Err(MmError::Validation(format!(
                    "Account '{}' is not a portfolio",
                    account.name
                )));
            }
            Some(account.id.clone())
        }
        None => None,
    };

    let portfolios = ctx.mm.portfolios(account_id.as_deref())?;
    if portfolios.is_empty() {
        display::warning("No portfolios found.");
        return Ok(());
    }

    emit(&render_portfolios(&portfolios, ctx.format(&args.output))?);
    Ok(())
}

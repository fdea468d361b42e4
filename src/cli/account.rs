//! Account CLI commands

use clap::Args;

use super::{emit, Context, OutputArgs};
use crate::display::{self, render_accounts};
use crate::error::MmResult;
use crate::moneymoney::ScriptRunner;
use crate::services::AccountFilter;

#[derive(Args, Debug, Clone, Default)]
pub struct AccountsArgs {
    /// Grouped display with section headers and subtotals
    #[arg(long)]
    pub hierarchy: bool,

    /// Only active accounts (skip closed groups)
    #[arg(long)]
    pub active: bool,

    /// Filter by account group (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// List accounts
pub fn handle_accounts_command<R: ScriptRunner>(ctx: &Context<R>, args: AccountsArgs) -> MmResult<()> {
    let accounts = AccountFilter::new()
        .groups(&args.groups)
        .active_only(args.active)
        .apply(ctx.mm.accounts()?);

    if accounts.is_empty() {
        display::warning("No accounts found matching the criteria.");
        return Ok(());
    }

    emit(&render_accounts(&accounts, ctx.format(&args.output), args.hierarchy)?);
    Ok(())
}

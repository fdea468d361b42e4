//! Category CLI commands

use clap::Args;

use super::{emit, Context, DateArgs, OutputArgs};
use crate::display::{self, render_categories, render_category_usage};
use crate::error::MmResult;
use crate::moneymoney::{ScriptRunner, TransactionQuery};
use crate::services::category_usage;

#[derive(Args, Debug, Clone, Default)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CategoryUsageArgs {
    #[command(flatten)]
    pub dates: DateArgs,

    /// Show top N categories (0 for all)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// List the category tree
pub fn handle_categories_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: CategoriesArgs,
) -> MmResult<()> {
    let categories = ctx.mm.categories()?;
    if categories.is_empty() {
        display::warning("No categories found.");
        return Ok(());
    }
    emit(&render_categories(&categories, ctx.format(&args.output))?);
    Ok(())
}

/// Categories sorted by how many transactions use them
pub fn handle_category_usage_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: CategoryUsageArgs,
) -> MmResult<()> {
    let query = TransactionQuery::new().from(args.dates.from).to(args.dates.to);
    let transactions = ctx.mm.transactions(&query)?;
    let categories = ctx.mm.categories()?;

    let usage = category_usage(&transactions, &categories, args.limit);
    if usage.is_empty() {
        display::warning("No categorized transactions found.");
        return Ok(());
    }

    emit(&render_category_usage(&usage, ctx.format(&args.output))?);
    Ok(())
}

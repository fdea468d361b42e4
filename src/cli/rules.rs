//! Rule suggestion CLI command

use clap::Args;

use super::{emit, Context, DateArgs, OutputArgs};
use crate::analysis::period::months_before;
use crate::display::{self, render_suggestions};
use crate::error::MmResult;
use crate::moneymoney::{ScriptRunner, TransactionQuery};
use crate::rules::suggest_rules;

#[derive(Args, Debug, Clone)]
pub struct SuggestRulesArgs {
    /// Range scanned for uncategorized transactions
    #[command(flatten)]
    pub dates: DateArgs,

    /// Months of categorized history to learn from
    #[arg(short = 'H', long = "history", default_value_t = 6)]
    pub history_months: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Suggest MoneyMoney rules for uncategorized transactions
pub fn handle_suggest_rules_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: SuggestRulesArgs,
) -> MmResult<()> {
    let target = ctx
        .mm
        .transactions(&TransactionQuery::new().from(args.dates.from).to(args.dates.to))?;
    let uncategorized: Vec<_> = target.into_iter().filter(|tx| !tx.is_categorized()).collect();

    let Some(earliest) = uncategorized.iter().map(|tx| tx.booking_date).min() else {
        display::warning("No uncategorized transactions found in the specified range.");
        return Ok(());
    };

    let history_start = months_before(earliest, args.history_months);
    let categorized: Vec<_> = ctx
        .mm
        .transactions(&TransactionQuery::new().from(Some(history_start)).to(args.dates.to))?
        .into_iter()
        .filter(|tx| tx.is_categorized())
        .collect();
    let categories = ctx.mm.categories()?;

    display::info(&format!(
        "Analyzing {} uncategorized transactions against {} categorized ones ({} months of history)...",
        uncategorized.len(),
        categorized.len(),
        args.history_months
    ));

    let suggestions = suggest_rules(&uncategorized, &categorized, &categories);
    if suggestions.is_empty() {
        display::warning("No rule suggestions could be generated.");
        return Ok(());
    }

    emit(&render_suggestions(&suggestions, ctx.format(&args.output))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::context;
    use crate::moneymoney::decode::fixtures;
    use crate::moneymoney::fake::FakeRunner;

    #[test]
    fn test_history_starts_before_earliest_uncategorized() {
        let runner = FakeRunner::new()
            .answer(fixtures::TRANSACTIONS)
            .answer(fixtures::TRANSACTIONS)
            .answer(fixtures::CATEGORIES);
        let (ctx, _temp) = context(runner);
        let args = SuggestRulesArgs {
            dates: DateArgs::default(),
            history_months: 3,
            output: OutputArgs::default(),
        };

        handle_suggest_rules_command(&ctx, args).unwrap();
        let scripts = ctx.mm.runner().scripts();
        assert_eq!(scripts.len(), 3);
        // earliest uncategorized booking is 2026-01-20
        assert!(scripts[1].contains("from date \"2025-10-20\""));
    }

    #[test]
    fn test_nothing_uncategorized() {
        let empty = "<plist version=\"1.0\"><dict><key>transactions</key><array/></dict></plist>";
        let (ctx, _temp) = context(FakeRunner::new().answer(empty));
        let args = SuggestRulesArgs {
            dates: DateArgs::default(),
            history_months: 6,
            output: OutputArgs::default(),
        };
        assert!(handle_suggest_rules_command(&ctx, args).is_ok());
        assert_eq!(ctx.mm.runner().scripts().len(), 1);
    }
}

//! Analysis CLI commands
//!
//! Each analysis loads transactions for its date range, narrows them to
//! the selected account groups, drops internal transfers unless asked
//! not to, and renders the result.

use std::collections::HashSet;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{emit, Context, DateArgs, OutputArgs};
use crate::analysis::period::{first_of_month, months_before};
use crate::analysis::{
    cashflow_start, compute_balance_history, compute_cashflow, compute_merchant_summary,
    compute_spending, compute_top_customers, detect_recurring, previous_period, Granularity,
    NamedPeriod, TransferDetector, TypeFilter,
};
use crate::display::{
    self, render_balance_history, render_cashflow, render_merchants, render_recurring,
    render_spending, render_top_customers,
};
use crate::error::MmResult;
use crate::models::{Category, Transaction};
use crate::moneymoney::{ScriptRunner, TransactionQuery};
use crate::services::{group_account_ids, match_accounts, restrict_to_accounts};

/// Analysis subcommands
#[derive(Subcommand, Debug)]
pub enum AnalyzeCommands {
    /// Spending by category with optional budget and period comparison
    Spending(SpendingArgs),
    /// Monthly or quarterly income vs. expenses
    Cashflow(CashflowArgs),
    /// Detect subscriptions and standing orders
    Recurring(RecurringArgs),
    /// Top merchants by total amount
    Merchants(MerchantsArgs),
    /// Income grouped by counterparty
    TopCustomers(TopCustomersArgs),
    /// Approximate month-end balance per account
    BalanceHistory(BalanceHistoryArgs),
}

/// Account group selection and transfer handling
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Filter by account group (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Include internal transfers (Umbuchungen)
    #[arg(long)]
    pub include_transfers: bool,
}

/// `--period` with `--from` / `--to` overrides
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Named period
    #[arg(short, long, value_enum, default_value_t = NamedPeriod::ThisMonth)]
    pub period: NamedPeriod,

    #[command(flatten)]
    pub dates: DateArgs,
}

/// Resolved analysis window
struct Window {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    label: String,
}

impl PeriodArgs {
    fn resolve(&self, today: NaiveDate) -> Window {
        if self.dates.is_set() {
            let show = |d: Option<NaiveDate>| d.map_or_else(|| "...".to_string(), |d| d.to_string());
            return Window {
                from: self.dates.from,
                to: self.dates.to,
                label: format!("{} to {}", show(self.dates.from), show(self.dates.to)),
            };
        }
        let range = self.period.resolve(today);
        Window {
            from: Some(range.start),
            to: Some(range.end),
            label: range.label,
        }
    }
}

/// Group restriction and transfer detector for one analysis run
struct Scope {
    groups: Vec<String>,
    account_ids: Option<HashSet<String>>,
    detector: Option<TransferDetector>,
}

impl Scope {
    /// Accounts are loaded only when groups or transfer detection need them
    fn load<R: ScriptRunner>(
        ctx: &Context<R>,
        args: &ScopeArgs,
        categories: Option<&[Category]>,
    ) -> MmResult<Self> {
        let accounts = if !args.groups.is_empty() || !args.include_transfers {
            ctx.mm.accounts()?
        } else {
            Vec::new()
        };

        let account_ids =
            (!args.groups.is_empty()).then(|| group_account_ids(&accounts, &args.groups));

        let detector = if args.include_transfers {
            None
        } else {
            let loaded;
            let categories = match categories {
                Some(categories) => categories,
                None => {
                    loaded = ctx.mm.categories()?;
                    &loaded
                }
            };
            Some(
                TransferDetector::new(categories, &ctx.settings.transfer_category)
                    .with_accounts(&accounts),
            )
        };

        Ok(Self {
            groups: args.groups.clone(),
            account_ids,
            detector,
        })
    }

    fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let transactions = match &self.account_ids {
            Some(ids) => restrict_to_accounts(transactions, ids),
            None => transactions,
        };
        match &self.detector {
            Some(detector) => detector.filter(transactions, &self.groups),
            None => transactions,
        }
    }
}

fn query(from: Option<NaiveDate>, to: Option<NaiveDate>, account: Option<&str>) -> TransactionQuery {
    let query = TransactionQuery::new().from(from).to(to);
    match account {
        Some(account) => query.account(account),
        None => query,
    }
}

pub fn handle_analyze_command<R: ScriptRunner>(ctx: &Context<R>, cmd: AnalyzeCommands) -> MmResult<()> {
    match cmd {
        AnalyzeCommands::Spending(args) => spending(ctx, args),
        AnalyzeCommands::Cashflow(args) => cashflow(ctx, args),
        AnalyzeCommands::Recurring(args) => recurring(ctx, args),
        AnalyzeCommands::Merchants(args) => merchants(ctx, args),
        AnalyzeCommands::TopCustomers(args) => top_customers(ctx, args),
        AnalyzeCommands::BalanceHistory(args) => balance_history(ctx, args),
    }
}

#[derive(Args, Debug, Clone)]
pub struct SpendingArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Compare with the previous period
    #[arg(short, long)]
    pub compare: bool,

    /// Filter by account ID, IBAN or name
    #[arg(short, long)]
    pub account: Option<String>,

    /// Only income or only expense transactions
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub type_filter: Option<TypeFilter>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn spending<R: ScriptRunner>(ctx: &Context<R>, args: SpendingArgs) -> MmResult<()> {
    let window = args.period.resolve(ctx.today);
    let categories = ctx.mm.categories()?;
    let scope = Scope::load(ctx, &args.scope, Some(&categories))?;

    let load = |from, to| -> MmResult<Vec<Transaction>> {
        let mut txs = scope.apply(ctx.mm.transactions(&query(from, to, args.account.as_deref()))?);
        if let Some(filter) = args.type_filter {
            txs.retain(|tx| filter.matches(tx));
        }
        Ok(txs)
    };

    let transactions = load(window.from, window.to)?;
    if transactions.is_empty() {
        display::warning("No transactions found for the specified period.");
        return Ok(());
    }

    let mut compare_label = None;
    let mut compare = None;
    if args.compare {
        match (window.from, window.to) {
            (Some(start), Some(end)) => {
                let previous = previous_period(start, end);
                compare = Some(load(Some(previous.start), Some(previous.end))?);
                compare_label = Some(previous.label);
            }
            _ => display::warning("--compare needs both a start and an end date; skipping comparison."),
        }
    }

    let results = compute_spending(&transactions, &categories, compare.as_deref());
    emit(&render_spending(
        &results,
        &window.label,
        compare_label.as_deref(),
        ctx.format(&args.output),
    )?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct CashflowArgs {
    /// Number of months to show
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    pub months: u32,

    /// Aggregation
    #[arg(short, long, value_enum, default_value_t = Granularity::Monthly)]
    pub period: Granularity,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn cashflow<R: ScriptRunner>(ctx: &Context<R>, args: CashflowArgs) -> MmResult<()> {
    let start = cashflow_start(ctx.today, args.months);
    let scope = Scope::load(ctx, &args.scope, None)?;
    let transactions = scope.apply(ctx.mm.transactions(&query(Some(start), Some(ctx.today), None))?);

    if transactions.is_empty() {
        display::warning("No transactions found for the specified period.");
        return Ok(());
    }

    let periods = compute_cashflow(&transactions, args.months, args.period, ctx.today);
    emit(&render_cashflow(&periods, ctx.format(&args.output))?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct RecurringArgs {
    /// Lookback period in months
    #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
    pub months: u32,

    /// Minimum occurrences to qualify
    #[arg(short = 'n', long, default_value_t = 3)]
    pub min_occurrences: usize,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn recurring<R: ScriptRunner>(ctx: &Context<R>, args: RecurringArgs) -> MmResult<()> {
    let start = months_before(ctx.today, args.months);
    let scope = Scope::load(ctx, &args.scope, None)?;
    let transactions = scope.apply(ctx.mm.transactions(&query(Some(start), Some(ctx.today), None))?);

    if transactions.is_empty() {
        display::warning("No transactions found for the specified period.");
        return Ok(());
    }

    let results = detect_recurring(&transactions, args.min_occurrences);
    if results.is_empty() {
        display::warning("No recurring transactions detected.");
        return Ok(());
    }

    emit(&render_recurring(&results, ctx.format(&args.output))?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct MerchantsArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Income, expense or all transactions
    #[arg(long = "type", value_enum, value_name = "TYPE", default_value_t = TypeFilter::Expense)]
    pub type_filter: TypeFilter,

    /// Maximum merchants to show (0 for all)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn merchants<R: ScriptRunner>(ctx: &Context<R>, args: MerchantsArgs) -> MmResult<()> {
    let window = args.period.resolve(ctx.today);
    let scope = Scope::load(ctx, &args.scope, None)?;
    let transactions = scope.apply(ctx.mm.transactions(&query(window.from, window.to, None))?);

    let results = compute_merchant_summary(&transactions, args.limit, args.type_filter);
    if results.is_empty() {
        display::warning("No merchant data to analyze.");
        return Ok(());
    }

    emit(&render_merchants(&results, ctx.format(&args.output))?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct TopCustomersArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Maximum customers to show (0 for all)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn top_customers<R: ScriptRunner>(ctx: &Context<R>, args: TopCustomersArgs) -> MmResult<()> {
    let window = args.period.resolve(ctx.today);
    let scope = Scope::load(ctx, &args.scope, None)?;
    let transactions = scope.apply(ctx.mm.transactions(&query(window.from, window.to, None))?);

    let results = compute_top_customers(&transactions, args.limit);
    if results.is_empty() {
        display::warning("No income transactions found.");
        return Ok(());
    }

    emit(&render_top_customers(&results, ctx.format(&args.output))?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct BalanceHistoryArgs {
    /// Number of months to show
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    pub months: u32,

    /// Filter by account name (substring) or IBAN
    #[arg(short, long)]
    pub account: Option<String>,

    /// Filter by account group (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn balance_history<R: ScriptRunner>(ctx: &Context<R>, args: BalanceHistoryArgs) -> MmResult<()> {
    let accounts = match_accounts(ctx.mm.accounts()?, args.account.as_deref(), &args.groups);
    if accounts.is_empty() {
        display::warning("No accounts found matching the criteria.");
        return Ok(());
    }

    let start = months_before(first_of_month(ctx.today), args.months - 1);
    let transactions = ctx.mm.transactions(&query(Some(start), Some(ctx.today), None))?;

    let snapshots = compute_balance_history(&accounts, &transactions, args.months, ctx.today);
    emit(&render_balance_history(&snapshots, ctx.format(&args.output))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::context;
    use crate::moneymoney::decode::fixtures;
    use crate::moneymoney::fake::FakeRunner;
    use crate::testing::date;

    fn period(named: NamedPeriod) -> PeriodArgs {
        PeriodArgs {
            period: named,
            dates: DateArgs::default(),
        }
    }

    #[test]
    fn test_window_from_named_period() {
        let window = period(NamedPeriod::LastMonth).resolve(date("2026-01-25"));
        assert_eq!(window.from, Some(date("2025-12-01")));
        assert_eq!(window.to, Some(date("2025-12-31")));
        assert_eq!(window.label, "December 2025");
    }

    #[test]
    fn test_window_dates_override_period() {
        let args = PeriodArgs {
            period: NamedPeriod::ThisYear,
            dates: DateArgs {
                from: Some(date("2026-01-01")),
                to: None,
            },
        };
        let window = args.resolve(date("2026-01-25"));
        assert_eq!(window.from, Some(date("2026-01-01")));
        assert_eq!(window.to, None);
        assert_eq!(window.label, "2026-01-01 to ...");
    }

    #[test]
    fn test_scope_without_groups_or_transfers_loads_nothing() {
        let (ctx, _temp) = context(FakeRunner::new());
        let args = ScopeArgs {
            groups: Vec::new(),
            include_transfers: true,
        };
        let scope = Scope::load(&ctx, &args, None).unwrap();
        assert!(scope.account_ids.is_none());
        assert!(scope.detector.is_none());
        assert!(ctx.mm.runner().scripts().is_empty());
    }

    #[test]
    fn test_scope_drops_transfer_to_own_account() {
        let runner = FakeRunner::new()
            .answer(fixtures::ACCOUNTS)
            .answer(fixtures::CATEGORIES)
            .answer(fixtures::TRANSACTIONS);
        let (ctx, _temp) = context(runner);

        let scope = Scope::load(&ctx, &ScopeArgs::default(), None).unwrap();
        let transactions = scope.apply(ctx.mm.transactions(&TransactionQuery::new()).unwrap());

        // 1002 goes to the closed Tagesgeld account
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, "1001");
    }

    #[test]
    fn test_spending_with_compare_queries_previous_month() {
        let runner = FakeRunner::new()
            .answer(fixtures::CATEGORIES)
            .answer(fixtures::ACCOUNTS)
            .answer(fixtures::TRANSACTIONS)
            .answer(fixtures::TRANSACTIONS);
        let (ctx, _temp) = context(runner);
        let args = SpendingArgs {
            period: period(NamedPeriod::ThisMonth),
            compare: true,
            account: None,
            type_filter: None,
            scope: ScopeArgs::default(),
            output: OutputArgs::default(),
        };

        handle_analyze_command(&ctx, AnalyzeCommands::Spending(args)).unwrap();
        let scripts = ctx.mm.runner().scripts();
        assert!(scripts[2].contains("from date \"2026-01-01\" to date \"2026-01-31\""));
        assert!(scripts[3].contains("from date \"2025-12-01\" to date \"2025-12-31\""));
    }

    #[test]
    fn test_cashflow_query_starts_months_back() {
        let runner = FakeRunner::new().answer(fixtures::TRANSACTIONS);
        let (ctx, _temp) = context(runner);
        let args = CashflowArgs {
            months: 3,
            period: Granularity::Monthly,
            scope: ScopeArgs {
                groups: Vec::new(),
                include_transfers: true,
            },
            output: OutputArgs::default(),
        };

        handle_analyze_command(&ctx, AnalyzeCommands::Cashflow(args)).unwrap();
        assert!(ctx.mm.runner().scripts()[0]
            .contains("from date \"2025-11-01\" to date \"2026-01-25\""));
    }

    #[test]
    fn test_balance_history_for_one_account() {
        let runner = FakeRunner::new()
            .answer(fixtures::ACCOUNTS)
            .answer(fixtures::TRANSACTIONS);
        let (ctx, _temp) = context(runner);
        let args = BalanceHistoryArgs {
            months: 2,
            account: Some("giro".into()),
            groups: Vec::new(),
            output: OutputArgs::default(),
        };

        handle_analyze_command(&ctx, AnalyzeCommands::BalanceHistory(args)).unwrap();
        assert!(ctx.mm.runner().scripts()[1].contains("from date \"2025-12-01\""));
    }
}

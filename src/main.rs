use anyhow::Result;
use clap::{Parser, Subcommand};

use mm_cli::cli::{
    handle_accounts_command, handle_analyze_command, handle_audit_command,
    handle_categories_command, handle_category_usage_command, handle_config_command,
    handle_export_command, handle_portfolio_command, handle_set_category_command,
    handle_set_checkmark_command, handle_set_comment_command, handle_suggest_rules_command,
    handle_transactions_command, handle_transfer_command, AccountsArgs, AnalyzeCommands,
    AuditArgs, CategoriesArgs, CategoryUsageArgs, ConfigCommands, Context, ExportArgs,
    PortfolioArgs, SetCategoryArgs, SetCheckmarkArgs, SetCommentArgs, SuggestRulesArgs,
    TransactionsArgs, TransferArgs,
};
use mm_cli::config::{MmPaths, Settings};
use mm_cli::display;
use mm_cli::moneymoney::MoneyMoney;

#[derive(Parser)]
#[command(
    name = "mm",
    version,
    about = "Command-line front end for the MoneyMoney finance app",
    long_about = "mm talks to MoneyMoney on macOS through AppleScript. It lists \
                  accounts, categories and transactions, analyzes spending and \
                  cash flow, exports statements, edits transactions and prepares \
                  SEPA transfers. MoneyMoney must be running and unlocked."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accounts with balances
    #[command(alias = "acc")]
    Accounts(AccountsArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// List transactions
    #[command(alias = "txn")]
    Transactions(TransactionsArgs),

    /// Show how often each category is used
    CategoryUsage(CategoryUsageArgs),

    /// Analyze spending, cash flow and more
    #[command(subcommand)]
    Analyze(AnalyzeCommands),

    /// Export transactions as a statement file
    Export(ExportArgs),

    /// Show depot holdings
    Portfolio(PortfolioArgs),

    /// Create a SEPA transfer
    Transfer(TransferArgs),

    /// Assign a category to a transaction
    SetCategory(SetCategoryArgs),

    /// Set or clear a transaction's checkmark
    SetCheckmark(SetCheckmarkArgs),

    /// Set a transaction's comment
    SetComment(SetCommentArgs),

    /// Suggest rules for uncategorized transactions
    SuggestRules(SuggestRulesArgs),

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show recent changes made through mm
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MmPaths::new()?;
    let settings = Settings::load_or_create(&paths).unwrap_or_else(|e| {
        display::warning(&format!("{}; using default settings", e));
        Settings::default()
    });

    // Building the bridge does not contact MoneyMoney yet
    let mm = MoneyMoney::connect().with_closed_groups(settings.closed_groups.clone());
    let ctx = Context::new(mm, settings, paths);

    match cli.command {
        Commands::Accounts(args) => handle_accounts_command(&ctx, args)?,
        Commands::Categories(args) => handle_categories_command(&ctx, args)?,
        Commands::Transactions(args) => handle_transactions_command(&ctx, args)?,
        Commands::CategoryUsage(args) => handle_category_usage_command(&ctx, args)?,
        Commands::Analyze(cmd) => handle_analyze_command(&ctx, cmd)?,
        Commands::Export(args) => handle_export_command(&ctx, args)?,
        Commands::Portfolio(args) => handle_portfolio_command(&ctx, args)?,
        Commands::Transfer(args) => handle_transfer_command(&ctx, args)?,
        Commands::SetCategory(args) => handle_set_category_command(&ctx, args)?,
        Commands::SetCheckmark(args) => handle_set_checkmark_command(&ctx, args)?,
        Commands::SetComment(args) => handle_set_comment_command(&ctx, args)?,
        Commands::SuggestRules(args) => handle_suggest_rules_command(&ctx, args)?,
        Commands::Audit(args) => handle_audit_command(&ctx, args)?,
        Commands::Config(cmd) => handle_config_command(&ctx.paths, &ctx.settings, cmd)?,
    }

    Ok(())
}

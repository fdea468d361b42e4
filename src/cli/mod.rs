//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the MoneyMoney bridge,
//! the analysis functions and the renderers.

pub mod account;
pub mod analyze;
pub mod audit;
pub mod category;
pub mod config;
pub mod export;
pub mod portfolio;
pub mod rules;
pub mod transaction;
pub mod transfer;

use chrono::NaiveDate;
use clap::Args;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{MmPaths, Settings};
use crate::display::{self, OutputFormat};
use crate::moneymoney::{MoneyMoney, Osascript, ScriptRunner};

pub use account::{handle_accounts_command, AccountsArgs};
pub use analyze::{handle_analyze_command, AnalyzeCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use category::{
    handle_categories_command, handle_category_usage_command, CategoriesArgs, CategoryUsageArgs,
};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportArgs};
pub use portfolio::{handle_portfolio_command, PortfolioArgs};
pub use rules::{handle_suggest_rules_command, SuggestRulesArgs};
pub use transaction::{
    handle_set_category_command, handle_set_checkmark_command, handle_set_comment_command,
    handle_transactions_command, SetCategoryArgs, SetCheckmarkArgs, SetCommentArgs,
    TransactionsArgs,
};
pub use transfer::{handle_transfer_command, TransferArgs};

/// `--format` for commands that render data
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format [default: from config, else table]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// `--from` / `--to` date range
#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(short = 'f', long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(short = 't', long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl DateArgs {
    pub fn is_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// Everything a handler needs for one invocation
pub struct Context<R: ScriptRunner = Osascript> {
    pub mm: MoneyMoney<R>,
    pub settings: Settings,
    pub paths: MmPaths,
    /// Reference date for relative periods
    pub today: NaiveDate,
}

impl<R: ScriptRunner> Context<R> {
    pub fn new(mm: MoneyMoney<R>, settings: Settings, paths: MmPaths) -> Self {
        Self {
            mm,
            settings,
            paths,
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn format(&self, output: &OutputArgs) -> OutputFormat {
        output.format.unwrap_or(self.settings.default_format)
    }

    /// Append to the audit log; a failed write only warns
    pub fn audit(&self, entry: &AuditEntry) {
        if !self.settings.audit_enabled {
            return;
        }
        let logger = AuditLogger::new(self.paths.audit_log());
        if let Err(e) = logger.log(entry) {
            display::warning(&format!("Could not write audit log: {}", e));
        }
    }
}

/// Print rendered output with exactly one trailing newline
pub(crate) fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

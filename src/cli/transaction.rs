//! Transaction CLI commands
//!
//! Listing with client-side filters, plus the three edits MoneyMoney
//! allows on a booked transaction: category, checkmark and comment.

use clap::{Args, ValueEnum};

use super::{emit, Context, DateArgs, OutputArgs};
use crate::analysis::TransferDetector;
use crate::audit::AuditEntry;
use crate::display::{self, render_transactions};
use crate::error::MmResult;
use crate::moneymoney::script::validate_transaction_id;
use crate::moneymoney::{ScriptRunner, TransactionQuery};
use crate::services::{resolve_category, TransactionFilter};

#[derive(Args, Debug, Clone, Default)]
pub struct TransactionsArgs {
    /// Filter by account ID, IBAN or name
    #[arg(short, long)]
    pub account: Option<String>,

    #[command(flatten)]
    pub dates: DateArgs,

    /// Filter by category name (substring)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show only uncategorized transactions
    #[arg(short, long)]
    pub uncategorized: bool,

    /// Show only checked transactions
    #[arg(long, conflicts_with = "unchecked")]
    pub checked: bool,

    /// Show only unchecked transactions
    #[arg(long)]
    pub unchecked: bool,

    /// Show only internal transfers
    #[arg(long, conflicts_with = "exclude_transfers")]
    pub only_transfers: bool,

    /// Hide internal transfers
    #[arg(long)]
    pub exclude_transfers: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl TransactionsArgs {
    fn filter(&self) -> TransactionFilter {
        let checked = match (self.checked, self.unchecked) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        TransactionFilter {
            category: self.category.clone(),
            uncategorized: self.uncategorized,
            checked,
        }
    }
}

/// List transactions
pub fn handle_transactions_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: TransactionsArgs,
) -> MmResult<()> {
    let mut query = TransactionQuery::new().from(args.dates.from).to(args.dates.to);
    if let Some(account) = &args.account {
        query = query.account(account.as_str());
    }

    let mut transactions = args.filter().apply(ctx.mm.transactions(&query)?);

    if args.only_transfers || args.exclude_transfers {
        let detector = TransferDetector::new(&ctx.mm.categories()?, &ctx.settings.transfer_category)
            .with_accounts(&ctx.mm.accounts()?);
        transactions = if args.only_transfers {
            detector.extract(transactions)
        } else {
            detector.filter(transactions, &[])
        };
    }

    if transactions.is_empty() {
        display::warning("No transactions found matching the criteria.");
        return Ok(());
    }

    emit(&render_transactions(&transactions, ctx.format(&args.output))?);
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct SetCategoryArgs {
    /// Transaction ID (from `mm transactions`)
    pub transaction_id: String,

    /// Category name or UUID
    pub category: String,

    /// Show what would be changed without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub fn handle_set_category_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: SetCategoryArgs,
) -> MmResult<()> {
    let id = validate_transaction_id(&args.transaction_id)?;
    let categories = ctx.mm.categories()?;
    let category = resolve_category(&categories, &args.category)?;

    if args.dry_run {
        display::info(&format!(
            "Would set transaction {} category to: {}",
            id, category.path
        ));
        display::info(&format!("Category ID: {}", category.id));
        return Ok(());
    }

    ctx.mm.set_category(id, &category.id)?;
    display::success(&format!(
        "Transaction {} category set to: {}",
        id, category.path
    ));
    ctx.audit(&AuditEntry::set_category(id, &category.id, &category.path));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Checkmark {
    On,
    Off,
}

#[derive(Args, Debug, Clone)]
pub struct SetCheckmarkArgs {
    /// Transaction ID (from `mm transactions`)
    pub transaction_id: String,

    #[arg(value_enum)]
    pub state: Checkmark,

    /// Show what would be changed without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub fn handle_set_checkmark_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: SetCheckmarkArgs,
) -> MmResult<()> {
    let id = validate_transaction_id(&args.transaction_id)?;
    let checked = args.state == Checkmark::On;
    let state = if checked { "on" } else { "off" };

    if args.dry_run {
        display::info(&format!("Would set transaction {} checkmark {}", id, state));
        return Ok(());
    }

    ctx.mm.set_checkmark(id, checked)?;
    display::success(&format!("Transaction {} checkmark {}", id, state));
    ctx.audit(&AuditEntry::set_checkmark(id, checked));
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct SetCommentArgs {
    /// Transaction ID (from `mm transactions`)
    pub transaction_id: String,

    /// New comment; an empty string clears it
    pub comment: String,

    /// Show what would be changed without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub fn handle_set_comment_command<R: ScriptRunner>(
    ctx: &Context<R>,
    args: SetCommentArgs,
) -> MmResult<()> {
    let id = validate_transaction_id(&args.transaction_id)?;

    if args.dry_run {
        display::info(&format!(
            "Would set transaction {} comment to: \"{}\"",
            id, args.comment
        ));
        return Ok(());
    }

    ctx.mm.set_comment(id, &args.comment)?;
    display::success(&format!("Transaction {} comment updated", id));
    ctx.audit(&AuditEntry::set_comment(id, &args.comment));
    Ok(())
}

//! CLI command handler for SEPA transfers
//!
//! The transfer is validated locally, then handed to MoneyMoney. Without
//! `--outbox` or `--draft` MoneyMoney opens its transfer window so the
//! user can review and sign.

use chrono::NaiveDate;
use clap::Args;

use super::Context;
use crate::audit::AuditEntry;
use crate::display;
use crate::error::{MmError, MmResult};
use crate::models::{Money, SepaTransfer, TransferDestination};
use crate::moneymoney::ScriptRunner;
use crate::services::TransferRequest;

#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Source account ID, IBAN or name
    #[arg(long)]
    pub from_account: String,

    /// Recipient name
    #[arg(long = "to", value_name = "NAME")]
    pub recipient: String,

    /// Recipient IBAN
    #[arg(long)]
    pub iban: String,

    /// Recipient BIC
    #[arg(long)]
    pub bic: Option<String>,

    /// Amount in EUR (e.g. "49.90" or "49,90")
    #[arg(long)]
    pub amount: String,

    /// Remittance information
    #[arg(long)]
    pub purpose: String,

    /// End-to-end reference
    #[arg(long)]
    pub reference: Option<String>,

    /// Scheduled execution date (YYYY-MM-DD)
    #[arg(long = "date", value_name = "DATE")]
    pub scheduled: Option<NaiveDate>,

    /// Queue in the outbox instead of opening the transfer window
    #[arg(long, conflicts_with = "draft")]
    pub outbox: bool,

    /// Save as a draft instead of opening the transfer window
    #[arg(long)]
    pub draft: bool,

    /// Validate and show the transfer without creating it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl TransferArgs {
    fn request(&self) -> MmResult<TransferRequest> {
        let amount = Money::parse(&self.amount).map_err(|e| {
            MmError::Validation(format!(
                "Invalid amount format: '{}'. Use format like '100.00' or '100'. Error: {}",
                self.amount, e
            ))
        })?;

        Ok(TransferRequest {
            from_account: self.from_account.clone(),
            recipient: self.recipient.clone(),
            iban: self.iban.clone(),
            bic: self.bic.clone(),
            amount,
            purpose: self.purpose.clone(),
            reference: self.reference.clone(),
            scheduled: self.scheduled,
        })
    }

    fn destination(&self) -> TransferDestination {
        if self.outbox {
            TransferDestination::Outbox
        } else if self.draft {
            TransferDestination::Draft
        } else {
            TransferDestination::Window
        }
    }
}

fn describe(transfer: &SepaTransfer, destination: TransferDestination) -> String {
    let mut lines = vec![
        format!("  From:        {}", transfer.from_account),
        format!("  To:          {} ({})", transfer.recipient, transfer.iban),
        format!("  Amount:      {}", transfer.amount.format_currency("EUR")),
        format!("  Purpose:     {}", transfer.purpose),
    ];
    if let Some(bic) = &transfer.bic {
        lines.push(format!("  BIC:         {}", bic));
    }
    if let Some(reference) = &transfer.reference {
        lines.push(format!("  Reference:   {}", reference));
    }
    if let Some(date) = transfer.scheduled {
        lines.push(format!("  Date:        {}", date));
    }
    lines.push(format!("  Destination: {}", destination_name(destination)));
    lines.join("\n")
}

fn destination_name(destination: TransferDestination) -> &'static str {
    match destination {
        TransferDestination::Window => "transfer window",
        TransferDestination::Outbox => "outbox",
        TransferDestination::Draft => "draft",
    }
}

/// Handle the transfer command
pub fn handle_transfer_command<R: ScriptRunner>(ctx: &Context<R>, args: TransferArgs) -> MmResult<()> {
    let request = args.request()?;
    request.validate()?;

    let accounts = ctx.mm.accounts()?;
    let transfer = request.prepare(&accounts)?;
    let destination = args.destination();

    if args.dry_run {
        display::info("Would create transfer:");
        println!("{}", describe(&transfer, destination));
        return Ok(());
    }

    ctx.mm.create_transfer(&transfer, destination)?;
    let message = match destination {
        TransferDestination::Window => "Transfer opened in MoneyMoney for review",
        TransferDestination::Outbox => "Transfer queued in the MoneyMoney outbox",
        TransferDestination::Draft => "Transfer saved as draft in MoneyMoney",
    };
    display::success(&format!(
        "{}: {} to {}",
        message,
        transfer.amount.format_currency("EUR"),
        transfer.recipient
    ));
    ctx.audit(&AuditEntry::create_transfer(&transfer, destination));
    Ok(())
}

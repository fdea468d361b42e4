//! Statement export CLI command

use std::path::PathBuf;

use clap::Args;

use super::{Context, DateArgs};
use crate::display;
use crate::error::MmResult;
use crate::export::{save_export, ExportFormat};
use crate::moneymoney::{ScriptRunner, TransactionQuery};

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Filter by account ID, IBAN or name
    #[arg(short, long)]
    pub account: Option<String>,

    #[command(flatten)]
    pub dates: DateArgs,

    /// Statement file format
    #[arg(long, value_enum, default_value_t = ExportFormat::Sta)]
    pub format: ExportFormat,

    /// Output file or directory [default: leave the temporary file]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export transactions to a statement file (MT940, CSV, OFX, ...)
pub fn handle_export_command<R: ScriptRunner>(ctx: &Context<R>, args: ExportArgs) -> MmResult<()> {
    let mut query = TransactionQuery::new().from(args.dates.from).to(args.dates.to);
    if let Some(account) = &args.account {
        query = query.account(account.as_str());
    }

    let exported = ctx.mm.export_file(&query, args.format)?;
    let saved = save_export(&exported, args.output.as_deref())?;

    if args.output.is_some() {
        display::success(&format!("Exported to: {}", saved.display()));
    } else {
        display::info(&format!("Exported to temporary file: {}", saved.display()));
        display::info("Use --output/-o to save to a specific location.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::context;
    use crate::moneymoney::fake::FakeRunner;

    #[test]
    fn test_copies_to_output() {
        let source_dir = tempfile::TempDir::new().unwrap();
        let source = source_dir.path().join("MoneyMoney.ofx");
        std::fs::write(&source, "OFXHEADER:100").unwrap();

        let (ctx, temp) = context(FakeRunner::new().answer(&source.display().to_string()));
        let target = temp.path().join("statements").join("january.ofx");
        let args = ExportArgs {
            account: Some("Girokonto".into()),
            dates: DateArgs::default(),
            format: ExportFormat::Ofx,
            output: Some(target.clone()),
        };

        handle_export_command(&ctx, args).unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "OFXHEADER:100");
        assert!(ctx.mm.runner().scripts()[0].ends_with("from account \"Girokonto\" as \"ofx\""));
    }
}

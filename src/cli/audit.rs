//! Audit log CLI command

use clap::Args;

use super::{emit, Context, OutputArgs};
use crate::audit::AuditLogger;
use crate::display::{self, render_audit_log};
use crate::error::MmResult;
use crate::moneymoney::ScriptRunner;

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Show the most recent audit log entries
pub fn handle_audit_command<R: ScriptRunner>(ctx: &Context<R>, args: AuditArgs) -> MmResult<()> {
    let logger = AuditLogger::new(ctx.paths.audit_log());
    if !logger.exists() {
        display::info(&format!("No audit log at {}", logger.path().display()));
        return Ok(());
    }

    let entries = logger.read_recent(args.limit)?;
    emit(&render_audit_log(&entries, ctx.format(&args.output))?);
    Ok(())
}

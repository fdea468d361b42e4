//! Configuration CLI commands
//!
//! These work without MoneyMoney running.

use clap::Subcommand;

use crate::config::{MmPaths, Settings};
use crate::display::{self, OutputFormat};
use crate::error::{MmError, MmResult};

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Write a configuration file
    Init {
        /// Root category whose subtree marks internal transfers
        #[arg(long)]
        transfer_category: Option<String>,

        /// Account group holding closed accounts (repeatable)
        #[arg(long = "closed-group", value_name = "GROUP")]
        closed_groups: Vec<String>,

        /// Output format used when --format is not given
        #[arg(long, value_enum)]
        default_format: Option<OutputFormat>,

        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

/// Handle configuration commands
pub fn handle_config_command(paths: &MmPaths, settings: &Settings, cmd: ConfigCommands) -> MmResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("mm-cli Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Config file:      {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            if !paths.is_initialized() {
                println!("(no config file, using defaults)");
            }
            println!();
            println!("Settings:");
            println!("  Transfer category: {}", settings.transfer_category);
            println!("  Closed groups:     {}", settings.closed_groups.join(", "));
            println!("  Default format:    {}", settings.default_format);
            println!("  Audit log enabled: {}", settings.audit_enabled);
        }
        ConfigCommands::Init {
            transfer_category,
            closed_groups,
            default_format,
            force,
        } => {
            if paths.is_initialized() && !force {
                return Err(MmError::Config(format!(
                    "Configuration already exists at {}. Use --force to overwrite.",
                    paths.settings_file().display()
                )));
            }

            let mut new_settings = Settings::default();
            if let Some(category) = transfer_category {
                let category = category.trim();
                if category.is_empty() {
                    return Err(MmError::Validation("Transfer category cannot be empty".into()));
                }
                new_settings.transfer_category = category.to_string();
            }
            if !closed_groups.is_empty() {
                new_settings.closed_groups = closed_groups;
            }
            if let Some(format) = default_format {
                new_settings.default_format = format;
            }

            new_settings.save(paths)?;
            display::success(&format!(
                "Configuration written to {}",
                paths.settings_file().display()
            ));
        }
    }

    Ok(())
}

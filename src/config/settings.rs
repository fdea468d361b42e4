//! User settings for mm-cli
//!
//! Controls transfer detection, which account groups count as closed,
//! the default output format and whether mutations are audited.

use serde::{Deserialize, Serialize};

use super::paths::MmPaths;
use crate::display::OutputFormat;
use crate::error::MmError;

/// User settings for mm-cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Root category whose subtree marks internal transfers (Umbuchungen)
    #[serde(default = "default_transfer_category")]
    pub transfer_category: String,

    /// Account groups that hold closed accounts
    #[serde(default = "default_closed_groups")]
    pub closed_groups: Vec<String>,

    /// Output format used when `--format` is not given
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Record mutating commands in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_transfer_category() -> String {
    "Umbuchungen".to_string()
}

fn default_closed_groups() -> Vec<String> {
    vec!["Aufgelöst".to_string()]
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            transfer_category: default_transfer_category(),
            closed_groups: default_closed_groups(),
            default_format: OutputFormat::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MmPaths) -> Result<Self, MmError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| MmError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| MmError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MmPaths) -> Result<(), MmError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MmError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MmError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Whether an account group name is one of `closed_groups`, ignoring case
pub fn is_closed_group(closed_groups: &[String], group: &str) -> bool {
    let group = group.to_lowercase();
    closed_groups.iter().any(|g| g.to_lowercase() == group)
}

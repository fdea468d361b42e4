//! Path management for mm-cli
//!
//! ## Path Resolution Order
//!
//! 1. `MM_CLI_CONFIG_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/mm-cli`
//! 3. `~/.config/mm-cli`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::MmError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "MM_CLI_CONFIG_DIR";

/// Manages all paths used by mm-cli
#[derive(Debug, Clone)]
pub struct MmPaths {
    /// Base directory for configuration and the audit log
    base_dir: PathBuf,
}

impl MmPaths {
    /// Create a new MmPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MmError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path(std::env::var("XDG_CONFIG_HOME").ok())?,
        };

        Ok(Self { base_dir })
    }

    /// Create MmPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/mm-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), MmError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MmError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path(xdg_config_home: Option<String>) -> Result<PathBuf, MmError> {
    let config_base = match xdg_config_home {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| MmError::Config("Could not determine home directory".into()))?,
    };
    Ok(config_base.join("mm-cli"))
}

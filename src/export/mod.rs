//! Bank statement export
//!
//! MoneyMoney encodes the statement files itself and answers with the path of
//! a temporary file. This module names the supported formats and copies the
//! result to where the user asked for it.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{MmError, MmResult};

/// Statement formats MoneyMoney can export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    /// MT940 (SWIFT statement)
    #[default]
    #[value(alias = "mt940")]
    Sta,
    /// Comma-separated values
    Csv,
    /// Open Financial Exchange
    Ofx,
    /// ISO 20022 CAMT.053 statement
    #[value(name = "camt.053", alias = "camt")]
    Camt053,
    /// Excel workbook
    Xls,
    /// Apple Numbers document
    Numbers,
}

impl ExportFormat {
    /// Format name as used in the `export transactions ... as` clause
    pub fn moneymoney_name(&self) -> &'static str {
        match self {
            Self::Sta => "sta",
            Self::Csv => "csv",
            Self::Ofx => "ofx",
            Self::Camt053 => "camt.053",
            Self::Xls => "xls",
            Self::Numbers => "numbers",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moneymoney_name())
    }
}

/// Copy an exported file to `output`, or leave it where MoneyMoney wrote it
///
/// When `output` is an existing directory the file keeps its name.
pub fn save_export(source: &Path, output: Option<&Path>) -> MmResult<PathBuf> {
    if !source.exists() {
        return Err(MmError::Export(format!(
            "MoneyMoney did not produce an export file at {}",
            source.display()
        )));
    }

    let Some(output) = output else {
        return Ok(source.to_path_buf());
    };

    let target = if output.is_dir() {
        let file_name = source
            .file_name()
            .ok_or_else(|| MmError::Export(format!("Invalid export path: {}", source.display())))?;
        output.join(file_name)
    } else {
        output.to_path_buf()
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            MmError::Export(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    std::fs::copy(source, &target).map_err(|e| {
        MmError::Export(format!("Failed to write {}: {}", target.display(), e))
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::Camt053.moneymoney_name(), "camt.053");
        assert_eq!(ExportFormat::Numbers.to_string(), "numbers");
        assert_eq!(ExportFormat::default(), ExportFormat::Sta);
    }

    #[test]
    fn test_value_enum_aliases() {
        assert_eq!(ExportFormat::from_str("mt940", true).unwrap(), ExportFormat::Sta);
        assert_eq!(ExportFormat::from_str("camt.053", true).unwrap(), ExportFormat::Camt053);
        assert!(ExportFormat::from_str("plist", true).is_err());
    }

    #[test]
    fn test_save_without_output_keeps_source() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("export.sta");
        std::fs::write(&source, ":20:STARTUMS").unwrap();

        assert_eq!(save_export(&source, None).unwrap(), source);
    }

    #[test]
    fn test_save_copies_to_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("export.ofx");
        std::fs::write(&source, "OFXHEADER:100").unwrap();

        let file_target = temp.path().join("out").join("statement.ofx");
        let written = save_export(&source, Some(&file_target)).unwrap();
        assert_eq!(written, file_target);
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "OFXHEADER:100");

        let dir_target = temp.path().join("out");
        let written = save_export(&source, Some(&dir_target)).unwrap();
        assert_eq!(written, dir_target.join("export.ofx"));
    }

    #[test]
    fn test_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = save_export(&temp.path().join("nope.sta"), None).unwrap_err();
        assert!(matches!(err, MmError::Export(_)));
    }
}

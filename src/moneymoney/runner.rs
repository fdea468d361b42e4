//! Script execution
//!
//! All communication with MoneyMoney goes through a [`ScriptRunner`]. The
//! production runner shells out to `osascript`; tests substitute a fake.

use std::io::ErrorKind;
use std::process::Command;

use crate::error::{MmError, MmResult};

/// Executes an AppleScript snippet and returns its trimmed output
pub trait ScriptRunner {
    fn run(&self, script: &str) -> MmResult<String>;
}

/// Runs scripts with the macOS `osascript` tool
#[derive(Debug, Clone)]
pub struct Osascript {
    program: String,
}

impl Osascript {
    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
        }
    }

    /// Use a different interpreter binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptRunner for Osascript {
    fn run(&self, script: &str) -> MmResult<String> {
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MmError::Script(format!(
                    "'{}' not found. MoneyMoney scripting requires macOS",
                    self.program
                )),
                _ => MmError::Io(format!("Failed to run {}: {}", self.program, e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Turn osascript's error output into an error variant
pub fn classify_failure(stderr: &str) -> MmError {
    if stderr.contains("MoneyMoney got an error") {
        return MmError::MoneyMoney(stderr.to_string());
    }

    let lower = stderr.to_lowercase();
    if lower.contains("isn't running") || lower.contains("isn’t running") || lower.contains("not running") {
        return MmError::NotRunning;
    }

    MmError::Script(stderr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_moneymoney_error() {
        let err = classify_failure(
            "execution error: MoneyMoney got an error: Locked database. (-2700)",
        );
        assert!(matches!(err, MmError::MoneyMoney(msg) if msg.contains("Locked database")));
    }

    #[test]
    fn test_classify_not_running() {
        let err = classify_failure("execution error: Application isn’t running. (-600)");
        assert!(matches!(err, MmError::NotRunning));

        let err = classify_failure("MoneyMoney is not running");
        assert!(matches!(err, MmError::NotRunning));
    }

    #[test]
    fn test_classify_other_failure() {
        let err = classify_failure("syntax error: Expected end of line. (-2741)");
        assert!(matches!(err, MmError::Script(_)));
    }

    #[test]
    fn test_missing_interpreter() {
        let runner = Osascript::with_program("mm-cli-test-no-such-binary");
        let err = runner.run("return 1").unwrap_err();
        assert!(matches!(err, MmError::Script(msg) if msg.contains("requires macOS")));
    }
}

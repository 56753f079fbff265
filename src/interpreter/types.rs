//! Interpreter Types
//!
//! Options that steer a run and the result the script driver hands back.

use serde::{Deserialize, Serialize};

use super::errors::ShellError;

/// How `${v:offset:length}` reads its second bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliceMode {
    /// `length` is an end index: `value[offset..length]`
    #[default]
    EndIndex,
    /// `length` is a character count: `value[offset..offset + length]`
    Count,
}

/// Interpreter options (set -e, set -x and friends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterOptions {
    /// set -e: stop at the first statement with a non-zero status
    pub exit_on_error: bool,
    /// set -x: print PS4 and each statement before running it
    pub print_executed: bool,
    pub slice_mode: SliceMode,
}

/// Outcome of running a whole script.
#[derive(Debug)]
pub struct ScriptResult {
    /// Status of the last executed statement; -1 when it failed with an error
    pub exit_code: i32,
    /// Error of the last executed statement, if it failed
    pub error: Option<ShellError>,
}

impl ScriptResult {
    /// Exit code reported for a statement that failed with an error.
    pub const ERROR_STATUS: i32 = -1;

    pub fn status(exit_code: i32) -> Self {
        Self { exit_code, error: None }
    }

    pub fn failed(error: ShellError) -> Self {
        Self {
            exit_code: Self::ERROR_STATUS,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }
}

impl Default for ScriptResult {
    fn default() -> Self {
        Self::status(0)
    }
}

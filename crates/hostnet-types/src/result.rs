//! ExecResult: the structured result of every command dispatch.
//!
//! Every command a terminal session runs produces one of these. Dispatch is
//! total: failures are reported through `code` and `err`, never by panicking
//! or returning an error to the transport.

use serde::{Deserialize, Serialize};

/// The result of executing one command line.
///
/// Serialized field names follow the transport contract
/// (`exit_code`, `stdout`, `stderr`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    #[serde(rename = "exit_code")]
    pub code: i64,
    /// Standard output. Empty when the command printed nothing.
    #[serde(rename = "stdout")]
    pub out: String,
    /// Standard error. Empty on success.
    #[serde(rename = "stderr")]
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// Create a result from raw output streams.
    pub fn from_output(code: i64, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            out: stdout.into(),
            err: stderr.into(),
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// Standard output, or `None` if the command printed nothing.
    pub fn stdout(&self) -> Option<&str> {
        (!self.out.is_empty()).then_some(self.out.as_str())
    }

    /// Standard error, or `None` if there was no error text.
    pub fn stderr(&self) -> Option<&str> {
        (!self.err.is_empty()).then_some(self.err.as_str())
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::success("")
    }
}

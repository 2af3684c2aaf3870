//! Command runner port for executing external programs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an external command produced no usable output.
///
/// Callers on the reporting path treat every variant as "no output"; the
/// distinction exists so genuine faults are not mistaken for a missing tool.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandError {
    /// The executable could not be found.
    #[error("`{program}` not found")]
    NotFound {
        /// Name of the executable.
        program: String,
    },
    /// The process ran but exited unsuccessfully.
    #[error("`{program}` exited with {}: {}", describe_code(.code), .stderr.trim())]
    NonZeroExit {
        /// Name of the executable.
        program: String,
        /// Exit code, or `None` when the process was killed by a signal.
        code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The argument vector could not be built or was empty.
    #[error("invalid arguments for `{program}`: {message}")]
    InvalidArguments {
        /// Name of the executable (empty when the vector itself was empty).
        program: String,
        /// What was wrong with the arguments.
        message: String,
    },
    /// Anything else: spawn failures other than not-found, undecodable output.
    #[error("`{program}` failed: {message}")]
    Fault {
        /// Name of the executable.
        program: String,
        /// Description of the underlying fault.
        message: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit status".to_string(), |c| format!("status {c}"))
}

/// Runs external programs without shell interpretation.
///
/// `argv[0]` is the executable; the remaining elements are passed through
/// verbatim, so paths and commit messages with shell metacharacters are inert.
pub trait CommandRunner: Send + Sync {
    /// Runs `argv` in `cwd`, blocking until the process exits.
    ///
    /// Returns the trimmed standard output on exit status 0.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] when the program is missing, exits
    /// non-zero, or cannot be run for any other reason.
    fn run(&self, argv: &[String], cwd: &Path) -> Result<String, CommandError>;
}

/// Builds an owned argument vector from string slices.
#[must_use]
pub fn argv<S: AsRef<str>>(parts: &[S]) -> Vec<String> {
    parts.iter().map(|p| p.as_ref().to_string()).collect()
}

//! Crate-level error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::fence::FenceError;
use crate::ports::command::CommandError;

/// The reporter was pointed at something that is not a git working tree.
#[derive(Debug, Error)]
#[error("the path '{}' is not a valid Git repository", .path.display())]
pub struct ConfigurationError {
    /// The path as the caller supplied it.
    pub path: PathBuf,
}

/// Everything that can stop a command-line operation.
///
/// Report generation itself never fails past construction; these errors
/// come from the surfaces around it (setup, archives, extraction, scripts).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid repository at reporter construction.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A caller-gated command (script execution) failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// No fenced block around the requested line.
    #[error(transparent)]
    Fence(#[from] FenceError),

    /// Filesystem failure.
    #[error("I/O error while {operation} at {}: {source}", .path.display())]
    Io {
        /// What was being attempted.
        operation: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A cassette file did not parse.
    #[error("failed to parse cassette {}: {source}", .path.display())]
    CassetteParse {
        /// The cassette path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A recording session could not be set up or finished.
    #[error("recording failed: {0}")]
    Recording(String),

    /// The repository has no resolvable HEAD.
    #[error("could not find latest commit hash in '{}'", .0.display())]
    NoCommits(PathBuf),

    /// No API key from the command line or the environment.
    #[error("no API key found: pass --api-key or set {0}")]
    MissingApiKey(String),

    /// Bad command-line usage.
    #[error("{0}")]
    Usage(String),
}

impl Error {
    /// Wraps an I/O error with the operation and path it came from.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { operation, path: path.into(), source }
    }
}

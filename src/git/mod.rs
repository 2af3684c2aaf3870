//! Commit reports built from `git` subprocess output.
//!
//! [`GitReporter`] is the entry point: it validates the repository once at
//! construction, then answers `generate_report` and listing requests by
//! running independent read-only commands through a [`CommandRunner`].
//! Any command failure degrades the report instead of aborting it; only
//! an unresolvable commit produces the placeholder text.
//!
//! [`CommandRunner`]: crate::ports::CommandRunner

pub mod changes;
pub mod format;
pub mod metadata;
pub mod reporter;
pub mod validate;

pub use changes::{ChangeKind, ChangeRecord, ChangeSet};
pub use format::{DefaultLineFormatter, LineFormatter};
pub use metadata::CommitMetadata;
pub use reporter::GitReporter;
pub use validate::is_valid_repository;

/// Everything `git` gets invoked as.
pub(crate) const GIT: &str = "git";

//! The reporting component bound to one repository.

use std::path::{Path, PathBuf};

use super::changes::ChangeSet;
use super::format::{render_report, DefaultLineFormatter, LineFormatter};
use super::metadata::fetch_metadata;
use super::validate::is_valid_repository;
use super::GIT;
use crate::error::ConfigurationError;
use crate::listing::{self, ListingRequest, NO_TREE_INFO, TREE_EXCLUDES};
use crate::ports::command::{argv, CommandRunner};

/// Depth of the project tree snapshot.
pub const TREE_DEPTH: u32 = 5;

/// Produces commit reports and listings for a validated working tree.
///
/// Holds only the absolute repository path, the line formatter and a
/// borrowed command runner; every report is recomputed from live command
/// output, nothing is cached between calls.
pub struct GitReporter<'a> {
    repo_path: PathBuf,
    runner: &'a dyn CommandRunner,
    formatter: Box<dyn LineFormatter>,
}

impl std::fmt::Debug for GitReporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitReporter").field("repo_path", &self.repo_path).finish_non_exhaustive()
    }
}

impl<'a> GitReporter<'a> {
    /// Binds a reporter to `path` using [`DefaultLineFormatter`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `path` is not inside a git working tree.
    pub fn new(runner: &'a dyn CommandRunner, path: &Path) -> Result<Self, ConfigurationError> {
        Self::with_formatter(runner, path, DefaultLineFormatter)
    }

    /// Binds a reporter to `path` with a custom per-file line formatter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `path` is not inside a git working tree.
    pub fn with_formatter(
        runner: &'a dyn CommandRunner,
        path: &Path,
        formatter: impl LineFormatter + 'static,
    ) -> Result<Self, ConfigurationError> {
        let repo_path = std::path::absolute(path)
            .map_err(|_| ConfigurationError { path: path.to_path_buf() })?;
        if !is_valid_repository(runner, &repo_path) {
            return Err(ConfigurationError { path: path.to_path_buf() });
        }
        Ok(Self { repo_path, runner, formatter: Box::new(formatter) })
    }

    /// Absolute path of the repository.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Full hash of `HEAD`, or `None` if it does not resolve (empty repository).
    #[must_use]
    pub fn latest_commit_hash(&self) -> Option<String> {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Renders the report for `commit_id`.
    ///
    /// Never fails: if the commit's metadata cannot be read the result is a
    /// one-line placeholder and no further commands run; failed change
    /// queries just leave the file list short or empty.
    #[must_use]
    pub fn generate_report(&self, commit_id: &str) -> String {
        let metadata = if commit_id.starts_with('-') {
            log::warn!("refusing option-like commit id {commit_id:?}");
            None
        } else {
            fetch_metadata(self.runner, &self.repo_path, commit_id)
        };
        let Some(metadata) = metadata else {
            return format!(
                "Could not generate report (failed to retrieve metadata for commit {commit_id})."
            );
        };

        let numstat = self.git(&["show", "--numstat", "--pretty=format:", commit_id]);
        let name_status = self.git(&["show", "--name-status", "--pretty=format:", commit_id]);
        let changes = ChangeSet::from_queries(numstat.as_deref(), name_status.as_deref());
        log::debug!("commit {commit_id}: {} changed path(s)", changes.len());

        render_report(&metadata.header, metadata.body.as_deref(), &changes, self.formatter.as_ref())
    }

    /// Runs a listing tool rooted at the repository. `None` if it is
    /// missing or fails.
    #[must_use]
    pub fn list(&self, request: &ListingRequest) -> Option<String> {
        listing::list(self.runner, &self.repo_path, request)
    }

    /// Tree snapshot of the repository (depth 5, build and VCS noise
    /// excluded), followed by a blank line. Falls back to
    /// [`NO_TREE_INFO`] when `tree` is unavailable.
    #[must_use]
    pub fn project_tree_info(&self) -> String {
        match self.list(&ListingRequest::tree(TREE_DEPTH, TREE_EXCLUDES)) {
            Some(tree) => format!("{tree}\n\n"),
            None => NO_TREE_INFO.to_string(),
        }
    }

    fn git(&self, args: &[&str]) -> Option<String> {
        let mut full = argv(&[GIT]);
        full.extend(args.iter().map(|a| (*a).to_string()));
        match self.runner.run(&full, &self.repo_path) {
            Ok(out) => Some(out),
            Err(e) => {
                log::debug!("{}: {e}", full.join(" "));
                None
            }
        }
    }
}

//! Commit header and message lookup.

use std::path::Path;

use super::GIT;
use crate::ports::command::{argv, CommandRunner};

/// `git show` pretty format for the metadata block.
pub const METADATA_FORMAT: &str = "commit %H%d%nAuthor: %an <%ae>%nDate:   %ad";

/// Header block and optional message body of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
    /// `commit <hash><refs>`, `Author:` and `Date:` lines.
    pub header: String,
    /// Raw message, absent when the lookup failed or the message is blank.
    pub body: Option<String>,
}

pub(crate) fn header_argv(commit: &str) -> Vec<String> {
    let pretty = format!("--pretty=format:{METADATA_FORMAT}");
    argv(&[GIT, "show", "--no-patch", "--date=default", pretty.as_str(), commit])
}

pub(crate) fn body_argv(commit: &str) -> Vec<String> {
    argv(&[GIT, "show", "--no-patch", "--pretty=format:%B", commit])
}

/// Looks up the header and message of `commit`.
///
/// Returns `None` when the header query fails, which is taken to mean the
/// commit does not resolve. A failing or empty message query only drops
/// the body.
pub fn fetch_metadata(
    runner: &dyn CommandRunner,
    repo: &Path,
    commit: &str,
) -> Option<CommitMetadata> {
    let header = match runner.run(&header_argv(commit), repo) {
        Ok(header) => header,
        Err(e) => {
            log::warn!("no metadata for commit {commit}: {e}");
            return None;
        }
    };

    let body = match runner.run(&body_argv(commit), repo) {
        Ok(body) if !body.trim().is_empty() => Some(body),
        Ok(_) => None,
        Err(e) => {
            log::debug!("no message body for commit {commit}: {e}");
            None
        }
    };

    Some(CommitMetadata { header, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::ScriptedRunner;
    use crate::ports::CommandError;

    const HEADER_CMD: &str = "git show --no-patch --date=default --pretty=format:commit %H%d%nAuthor: %an <%ae>%nDate:   %ad abc123";
    const BODY_CMD: &str = "git show --no-patch --pretty=format:%B abc123";

    #[test]
    fn header_format_is_one_argument() {
        let args = header_argv("HEAD~1");
        assert_eq!(args.len(), 6);
        assert_eq!(args[4], "--pretty=format:commit %H%d%nAuthor: %an <%ae>%nDate:   %ad");
        assert_eq!(args[5], "HEAD~1");
    }

    #[test]
    fn fetches_header_and_body() {
        let runner = ScriptedRunner::new()
            .ok(HEADER_CMD, "commit abc123\nAuthor: A <a@b>\nDate:   now")
            .ok(BODY_CMD, "Fix parser\n\nHandles tabs.");
        let meta = fetch_metadata(&runner, Path::new("/repo"), "abc123").unwrap();
        assert_eq!(meta.header, "commit abc123\nAuthor: A <a@b>\nDate:   now");
        assert_eq!(meta.body.as_deref(), Some("Fix parser\n\nHandles tabs."));
    }

    #[test]
    fn header_failure_means_not_found_and_skips_body() {
        let runner = ScriptedRunner::new().err(
            HEADER_CMD,
            CommandError::NonZeroExit {
                program: "git".into(),
                code: Some(128),
                stdout: String::new(),
                stderr: "fatal: bad revision".into(),
            },
        );
        assert!(fetch_metadata(&runner, Path::new("/repo"), "abc123").is_none());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn body_failure_or_blank_body_is_absent() {
        let runner = ScriptedRunner::new().ok(HEADER_CMD, "commit abc123");
        let meta = fetch_metadata(&runner, Path::new("/repo"), "abc123").unwrap();
        assert!(meta.body.is_none());

        let runner = ScriptedRunner::new().ok(HEADER_CMD, "commit abc123").ok(BODY_CMD, "  ");
        let meta = fetch_metadata(&runner, Path::new("/repo"), "abc123").unwrap();
        assert!(meta.body.is_none());
    }
}

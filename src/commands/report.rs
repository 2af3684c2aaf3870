//! `ajapopaja report` command.

use std::path::Path;

use super::Output;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::git::GitReporter;
use crate::listing::ListingRequest;

/// Banner above the file tree section.
pub const TREE_BANNER: &str = "==================== FILE TREE ====================";

/// Banner above the disk usage section.
pub const DU_BANNER: &str = "==================== DISK USAGE (du) ====================";

/// `tree -L 3 -I ...`
fn tree_request() -> ListingRequest {
    ListingRequest::tree(3, [".git", "node_modules", "*.pyc", "__pycache__"])
}

/// `du -ch --exclude ...`
fn du_request() -> ListingRequest {
    ListingRequest::new("du").args("-ch").exclude("--exclude", [".git", "__pycache__"])
}

/// Execute the `report` command.
///
/// Reports on `commit`, or on HEAD when none is given, and optionally
/// appends tree and disk usage sections. A missing listing tool only
/// produces a notice.
///
/// # Errors
///
/// Returns an error if `repo` is not a git working tree, or if no commit
/// was given and HEAD does not resolve.
pub fn run(
    ctx: &ServiceContext,
    repo: &Path,
    commit: Option<&str>,
    tree: bool,
    du: bool,
) -> Result<Output, Error> {
    let reporter = GitReporter::new(ctx.command.as_ref(), repo)?;
    let commit = match commit {
        Some(commit) => commit.to_string(),
        None => reporter
            .latest_commit_hash()
            .ok_or_else(|| Error::NoCommits(reporter.repo_path().to_path_buf()))?,
    };

    let mut out = Output::default();
    out.line(&reporter.generate_report(&commit));

    if tree {
        section(&mut out, &reporter, TREE_BANNER, &tree_request(), "file tree");
    }
    if du {
        section(&mut out, &reporter, DU_BANNER, &du_request(), "disk usage");
    }
    Ok(out)
}

fn section(
    out: &mut Output,
    reporter: &GitReporter<'_>,
    banner: &str,
    request: &ListingRequest,
    what: &str,
) {
    out.line(&format!("\n{banner}\n"));
    match reporter.list(request).filter(|listing| !listing.is_empty()) {
        Some(listing) => out.line(&listing),
        None => out.notice(format!(
            "Could not generate {what} (is '{}' installed and accessible?).",
            request.tool
        )),
    }
}

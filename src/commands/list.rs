//! `ajapopaja list` command.

use std::path::Path;

use super::Output;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::git::GitReporter;
use crate::listing::ListingRequest;

/// Execute the `list` command: run `tool` in the repository and print its
/// output, or a notice when it produced none.
///
/// # Errors
///
/// Returns an error if `repo` is not a git working tree.
pub fn run(
    ctx: &ServiceContext,
    repo: &Path,
    tool: &str,
    args: Option<&str>,
    exclude_flag: Option<&str>,
    patterns: &[String],
) -> Result<Output, Error> {
    let reporter = GitReporter::new(ctx.command.as_ref(), repo)?;

    let mut request = ListingRequest::new(tool);
    request.common_args = args.map(str::to_string);
    request.exclude_flag = exclude_flag.map(str::to_string);
    request.patterns = patterns.to_vec();

    let mut out = Output::default();
    match reporter.list(&request).filter(|listing| !listing.is_empty()) {
        Some(listing) => out.line(&listing),
        None => out.notice(format!("No output from '{tool}' (is it installed and accessible?).")),
    }
    Ok(out)
}

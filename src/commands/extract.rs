//! `ajapopaja extract` command.

use std::path::Path;

use super::Output;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::fence::save_fenced_block;
use crate::script::run_script;

/// Execute the `extract` command.
///
/// Saves the fenced block around `line` of `file` to `out_dir/name`
/// (`out_dir` defaults to the repository) and, with `run`, executes the
/// saved file with bash from the repository root.
///
/// # Errors
///
/// Returns an error if the file cannot be read, no block encloses the
/// line, the block cannot be saved, or the script fails.
pub fn run(
    ctx: &ServiceContext,
    repo: &Path,
    file: &Path,
    line: usize,
    out_dir: Option<&Path>,
    name: &str,
    run: bool,
) -> Result<Output, Error> {
    let text = ctx.fs.read_to_string(file).map_err(|e| Error::io("reading markdown", file, e))?;
    let lines: Vec<&str> = text.lines().collect();

    let dir = out_dir.unwrap_or(repo);
    let saved = save_fenced_block(ctx.fs.as_ref(), &lines, line, dir, name)?;

    let mut out = Output::default();
    out.notice(format!(
        "Saved fenced block (lines {}-{}) to {}",
        saved.opening_line,
        saved.closing_line,
        saved.path.display()
    ));

    if run {
        // bash runs from the repository, so a script outside it needs an
        // absolute path.
        let script = if out_dir.is_some() {
            let path = std::path::absolute(&saved.path)
                .map_err(|e| Error::io("resolving script path", saved.path.clone(), e))?;
            path.to_string_lossy().into_owned()
        } else {
            name.to_string()
        };
        let stdout = run_script(ctx.command.as_ref(), repo, &script)?;
        if !stdout.is_empty() {
            out.line(&stdout);
        }
    }
    Ok(out)
}

//! Locating and extracting a fenced code block around a cursor line.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::Error;
use crate::ports::filesystem::FileSystem;

/// Marker that opens and closes a fenced block.
pub const FENCE: &str = "```";

/// No complete fenced block around the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenceError {
    /// Nothing at or above the cursor starts with a fence.
    #[error("opening fence not found above the cursor")]
    OpeningNotFound,
    /// An opening fence was found but nothing below it closes the block.
    #[error("closing fence not found below the opening fence on line {opening_line}")]
    ClosingNotFound {
        /// 1-indexed line of the opening fence.
        opening_line: usize,
    },
}

/// A located fenced block. Line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// Line of the opening fence.
    pub opening_line: usize,
    /// Line of the closing fence.
    pub closing_line: usize,
    /// Lines strictly between the fences, joined with `\n`.
    pub content: String,
}

/// Where a saved block went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBlock {
    /// Line of the opening fence.
    pub opening_line: usize,
    /// Line of the closing fence.
    pub closing_line: usize,
    /// File the content was written to.
    pub path: PathBuf,
}

fn is_fence(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// Finds the block enclosing `cursor_row` (1-indexed).
///
/// The opening fence is the nearest fence line at or above the cursor; the
/// closing fence is the first fence line after it. A cursor beyond the end
/// of `lines` scans from the last line.
///
/// # Errors
///
/// Returns [`FenceError`] if either fence is missing.
pub fn find_fenced_block<S: AsRef<str>>(
    lines: &[S],
    cursor_row: usize,
) -> Result<FencedBlock, FenceError> {
    let start = cursor_row.min(lines.len());
    let opening = lines[..start]
        .iter()
        .rposition(|line| is_fence(line.as_ref()))
        .ok_or(FenceError::OpeningNotFound)?;

    let closing = lines[opening + 1..]
        .iter()
        .position(|line| is_fence(line.as_ref()))
        .map(|offset| opening + 1 + offset)
        .ok_or(FenceError::ClosingNotFound { opening_line: opening + 1 })?;

    let content = lines[opening + 1..closing]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    Ok(FencedBlock { opening_line: opening + 1, closing_line: closing + 1, content })
}

/// Extracts the block around `cursor_row` and writes its content to
/// `dir/filename`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`Error::Fence`] if no block encloses the cursor, or
/// [`Error::Io`] if the file cannot be written.
pub fn save_fenced_block<S: AsRef<str>>(
    fs: &dyn FileSystem,
    lines: &[S],
    cursor_row: usize,
    dir: &Path,
    filename: &str,
) -> Result<SavedBlock, Error> {
    let block = find_fenced_block(lines, cursor_row)?;
    fs.create_dir_all(dir).map_err(|e| Error::io("creating extraction directory", dir, e))?;
    let path = dir.join(filename);
    fs.write(&path, &block.content).map_err(|e| Error::io("saving fenced block", &path, e))?;
    log::info!(
        "saved lines {}-{} to {}",
        block.opening_line,
        block.closing_line,
        path.display()
    );
    Ok(SavedBlock { opening_line: block.opening_line, closing_line: block.closing_line, path })
}

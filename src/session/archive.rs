//! Markdown archive of individual turns.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::Error;
use crate::ports::filesystem::FileSystem;

/// What goes into one archived turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnRecord<'a> {
    /// 1-based prompt sequence number within the session.
    pub sequence: u64,
    /// The prompt text.
    pub prompt: &'a str,
    /// The response text.
    pub response: &'a str,
    /// Prompt tokens for this turn.
    pub input_tokens: u64,
    /// Response tokens for this turn.
    pub output_tokens: u64,
}

/// Renders the markdown for one turn.
#[must_use]
pub fn render_turn(when: NaiveDateTime, turn: &TurnRecord<'_>) -> String {
    format!(
        "\n## Turn Report\n\n\
         **When:** {when}\n\
         **Prompt Sequence:** {seq}\n\n\
         ### Prompt\n{prompt}\n\n\
         ### Token Information\n\
         *   Input Tokens: {input}\n\
         *   Output Tokens: {output}\n\n\
         ---\n{response}",
        when = when.format("%Y-%m-%d %H:%M:%S"),
        seq = turn.sequence,
        prompt = turn.prompt,
        input = turn.input_tokens,
        output = turn.output_tokens,
        response = turn.response,
    )
}

/// Writes `dir/turn-<sequence>.md`, creating `dir` if needed, and returns
/// the file path. An existing file for the same sequence is overwritten.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory or file cannot be written.
pub fn archive_turn(
    fs: &dyn FileSystem,
    dir: &Path,
    when: NaiveDateTime,
    turn: &TurnRecord<'_>,
) -> Result<PathBuf, Error> {
    fs.create_dir_all(dir).map_err(|e| Error::io("creating log directory", dir, e))?;
    let path = dir.join(format!("turn-{}.md", turn.sequence));
    fs.write(&path, &render_turn(when, turn))
        .map_err(|e| Error::io("writing turn archive", &path, e))?;
    log::debug!("archived turn {} to {}", turn.sequence, path.display());
    Ok(path)
}

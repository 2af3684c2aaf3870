//! `ajapopaja archive` command.

use std::path::Path;

use super::Output;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::session::{ChatSession, SessionConfig, TokenUsage};

/// Arguments of the `archive` command.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveArgs<'a> {
    /// File holding the prompt text.
    pub prompt_file: &'a Path,
    /// File holding the response text.
    pub response_file: &'a Path,
    /// Prompt token count, if known.
    pub input_tokens: Option<u64>,
    /// Response token count, if known.
    pub output_tokens: Option<u64>,
    /// Where the session workspace goes; the system temp directory if unset.
    pub workspace_parent: Option<&'a Path>,
    /// Where the session log directory goes; the workspace parent if unset.
    pub log_dir: Option<&'a Path>,
}

/// Execute the `archive` command: start a session, record one turn and
/// print where it was archived.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or the session
/// directories cannot be written.
pub fn run(ctx: &ServiceContext, args: &ArchiveArgs<'_>) -> Result<Output, Error> {
    let prompt = ctx
        .fs
        .read_to_string(args.prompt_file)
        .map_err(|e| Error::io("reading prompt", args.prompt_file, e))?;
    let response = ctx
        .fs
        .read_to_string(args.response_file)
        .map_err(|e| Error::io("reading response", args.response_file, e))?;

    let workspace_parent =
        args.workspace_parent.map_or_else(std::env::temp_dir, Path::to_path_buf);
    let log_dir = args.log_dir.map_or_else(|| workspace_parent.clone(), Path::to_path_buf);
    let config = SessionConfig::new(workspace_parent, log_dir);

    let mut session =
        ChatSession::new(config, ctx.fs.as_ref(), ctx.clock.as_ref(), ctx.id_gen.as_ref())?;
    let usage = TokenUsage { prompt_tokens: args.input_tokens, candidates_tokens: args.output_tokens };
    session.record_turn(&prompt, &response, Some(usage))?;

    let mut out = Output::default();
    out.line(&format!("Session: {}", session.id()));
    out.line(&format!("Workspace: {}", session.workspace().display()));
    out.line(&format!(
        "Archived: {}",
        session.log_directory().join(format!("turn-{}.md", session.prompt_count())).display()
    ));
    out.line(&format!(
        "Tokens: {} in, {} out, {} total",
        session.prompt_token_count(),
        session.candidates_token_count(),
        session.total_token_count()
    ));
    Ok(out)
}

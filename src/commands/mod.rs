//! Command dispatch and handlers.

pub mod archive;
pub mod extract;
pub mod key;
pub mod list;
pub mod report;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::error::Error;

/// Directory to record port interactions into.
pub const RECORD_ENV: &str = "AJAPOPAJA_RECORD";

/// Cassette to replay port interactions from.
pub const REPLAY_ENV: &str = "AJAPOPAJA_REPLAY";

/// What a handler produced: text for stdout and notices for stderr.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Output {
    /// Printed to stdout as is.
    pub stdout: String,
    /// Printed to stderr, one per line.
    pub notices: Vec<String>,
}

impl Output {
    fn line(&mut self, text: &str) {
        self.stdout.push_str(text);
        self.stdout.push('\n');
    }

    fn notice(&mut self, text: impl Into<String>) {
        self.notices.push(text.into());
    }

    fn emit(&self) {
        print!("{}", self.stdout);
        for notice in &self.notices {
            eprintln!("{notice}");
        }
    }
}

/// Dispatch a parsed command line to its handler.
///
/// `AJAPOPAJA_REPLAY=<cassette>` serves command, clock and id interactions
/// from a recorded cassette. Otherwise `AJAPOPAJA_RECORD=<dir>` records them
/// to per-port cassette files below that directory.
///
/// # Errors
///
/// Returns an error if the context cannot be set up, the handler fails, or
/// a recording cannot be written.
pub fn dispatch(cli: &Cli) -> Result<(), Error> {
    let (ctx, session) = if let Some(cassette) = env::var_os(REPLAY_ENV) {
        log::info!("replaying from {}", Path::new(&cassette).display());
        (ServiceContext::replaying(Path::new(&cassette))?, None)
    } else if let Some(root) = env::var_os(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(root), &cli.repository)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(cli, &ctx);

    // The recording adapters hold the recorders until the context is gone.
    drop(ctx);
    if let Some(session) = session {
        finish_recording(session)?;
    }

    result?.emit();
    Ok(())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<Output, Error> {
    let repo = cli.repository.as_path();
    match &cli.command {
        Command::Report { commit, tree, du } => {
            report::run(ctx, repo, commit.as_deref(), *tree, *du)
        }
        Command::List { tool, args, exclude_flag, patterns } => {
            list::run(ctx, repo, tool, args.as_deref(), exclude_flag.as_deref(), patterns)
        }
        Command::Extract { file, line, out_dir, name, run } => {
            extract::run(ctx, repo, file, *line, out_dir.as_deref(), name, *run)
        }
        Command::Archive {
            prompt_file,
            response_file,
            input_tokens,
            output_tokens,
            workspace_parent,
            log_dir,
        } => archive::run(
            ctx,
            &archive::ArchiveArgs {
                prompt_file: prompt_file.as_path(),
                response_file: response_file.as_path(),
                input_tokens: *input_tokens,
                output_tokens: *output_tokens,
                workspace_parent: workspace_parent.as_deref(),
                log_dir: log_dir.as_deref(),
            },
        ),
        Command::Key { api_key, env_var } => key::run(api_key.as_deref(), env_var),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), Error> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::adapters::live::{LiveClock, LiveFileSystem, LiveIdGenerator};
    use crate::context::ServiceContext;
    use crate::git::testing::ScriptedRunner;

    /// A live context whose commands come from `runner`.
    pub fn scripted_context(runner: ScriptedRunner) -> ServiceContext {
        ServiceContext {
            command: Box::new(runner),
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::git::testing::{ScriptedRunner, VALIDATE};

    #[test]
    fn dispatches_to_the_report_handler() {
        let cli = Cli::parse_from(["ajapopaja", "-C", "/repo", "report"]);
        let ctx = testing::scripted_context(ScriptedRunner::new().ok(VALIDATE, "false"));
        let err = dispatch_with_context(&cli, &ctx).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn output_collects_lines_and_notices() {
        let mut out = Output::default();
        out.line("a");
        out.line("b");
        out.notice("careful");
        assert_eq!(out.stdout, "a\nb\n");
        assert_eq!(out.notices, vec!["careful"]);
    }
}

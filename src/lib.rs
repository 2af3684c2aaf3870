//! Core library for the `ajapopaja` CLI.
//!
//! The heart of the crate is [`git::GitReporter`], which turns the output of
//! a few read-only `git` commands into a deterministic plain-text commit
//! report. Around it sit the listing invoker, fenced-block extraction,
//! script execution and chat-session bookkeeping used to feed project
//! state into an AI conversation.

pub mod adapters;
pub mod api_key;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod fence;
pub mod git;
pub mod listing;
pub mod ports;
pub mod script;
pub mod session;

pub use error::{ConfigurationError, Error};

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };
    commands::dispatch(&cli)
}

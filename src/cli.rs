//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api_key::DEFAULT_API_KEY_ENV;
use crate::script::EXEC_SCRIPT;

/// Top-level CLI parser for `ajapopaja`.
#[derive(Debug, Parser)]
#[command(name = "ajapopaja", version, about = "Commit reports and project snapshots for AI prompts")]
pub struct Cli {
    /// Git working tree to operate on.
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub repository: PathBuf,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the report for a commit (HEAD by default).
    Report {
        /// Commit to report on.
        #[arg(long)]
        commit: Option<String>,
        /// Append a file tree listing.
        #[arg(long)]
        tree: bool,
        /// Append a disk usage listing.
        #[arg(long)]
        du: bool,
    },
    /// Run a listing tool in the repository.
    List {
        /// Executable to run, e.g. `tree` or `du`.
        tool: String,
        /// Common arguments, split like a shell would.
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
        /// Flag placed before each pattern, e.g. `-I` or `--exclude`.
        #[arg(long, allow_hyphen_values = true)]
        exclude_flag: Option<String>,
        /// Patterns to exclude.
        patterns: Vec<String>,
    },
    /// Save the fenced code block around a line of a markdown file.
    Extract {
        /// Markdown file to read.
        #[arg(long)]
        file: PathBuf,
        /// 1-indexed line inside (or below the opening of) the block.
        #[arg(long)]
        line: usize,
        /// Directory to save into; defaults to the repository.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// File name to save as.
        #[arg(long, default_value = EXEC_SCRIPT)]
        name: String,
        /// Run the saved file with bash in the repository.
        #[arg(long)]
        run: bool,
    },
    /// Record one prompt/response turn in a new session and archive it.
    Archive {
        /// File holding the prompt text.
        #[arg(long)]
        prompt_file: PathBuf,
        /// File holding the response text.
        #[arg(long)]
        response_file: PathBuf,
        /// Prompt token count.
        #[arg(long)]
        input_tokens: Option<u64>,
        /// Response token count.
        #[arg(long)]
        output_tokens: Option<u64>,
        /// Parent directory of the session workspace.
        #[arg(long)]
        workspace_parent: Option<PathBuf>,
        /// Parent directory of the session log directory.
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Report whether an API key is available.
    Key {
        /// Key given on the command line.
        #[arg(long, short = 'a')]
        api_key: Option<String>,
        /// Environment variable to fall back to.
        #[arg(long, default_value = DEFAULT_API_KEY_ENV)]
        env_var: String,
    },
}

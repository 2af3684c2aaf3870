//! Generic "list files" tool invocations (`tree`, `du`, ...).
//!
//! The output is opaque text; the only structure imposed here is the
//! argument order: tool, then one `flag pattern` pair per exclusion, then
//! the common arguments.

use std::path::Path;

use crate::ports::command::{CommandError, CommandRunner};

/// Placeholder callers substitute when no tree listing is available.
pub const NO_TREE_INFO: &str = "No tree info.\n\n";

/// Patterns the project tree snapshot leaves out.
pub const TREE_EXCLUDES: [&str; 5] = [".git", ".exec.sh", "node_modules", "*.pyc", "__pycache__"];

/// One listing tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Executable name.
    pub tool: String,
    /// Arguments in shell-word syntax, e.g. `-L 5`.
    pub common_args: Option<String>,
    /// Flag placed before each exclusion pattern, e.g. `-I`.
    pub exclude_flag: Option<String>,
    /// Exclusion patterns, passed verbatim.
    pub patterns: Vec<String>,
}

impl ListingRequest {
    /// A bare invocation of `tool`.
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into(), common_args: None, exclude_flag: None, patterns: Vec::new() }
    }

    /// Sets the common arguments.
    #[must_use]
    pub fn args(mut self, common_args: impl Into<String>) -> Self {
        self.common_args = Some(common_args.into());
        self
    }

    /// Sets the exclusion flag and patterns.
    #[must_use]
    pub fn exclude<I, S>(mut self, flag: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_flag = Some(flag.into());
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// `tree -L <depth> -I <pattern>...` over `patterns`.
    pub fn tree<I, S>(depth: u32, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("tree").args(format!("-L {depth}")).exclude("-I", patterns)
    }

    /// Builds the argument vector.
    ///
    /// Patterns are dropped when no (or an empty) exclusion flag is set.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArguments`] for an empty tool name or
    /// common arguments with unbalanced quotes.
    pub fn argv(&self) -> Result<Vec<String>, CommandError> {
        if self.tool.is_empty() {
            return Err(CommandError::InvalidArguments {
                program: String::new(),
                message: "no tool name given".into(),
            });
        }
        let mut argv = vec![self.tool.clone()];

        if let Some(flag) = self.exclude_flag.as_deref().filter(|f| !f.is_empty()) {
            for pattern in &self.patterns {
                argv.push(flag.to_string());
                argv.push(pattern.clone());
            }
        }

        if let Some(args) = &self.common_args {
            let words = shell_words::split(args).map_err(|e| CommandError::InvalidArguments {
                program: self.tool.clone(),
                message: format!("cannot split {args:?}: {e}"),
            })?;
            argv.extend(words);
        }
        Ok(argv)
    }
}

/// Runs a listing tool in `cwd`. Returns `None` if the tool is missing,
/// fails, or its arguments do not parse.
pub fn list(runner: &dyn CommandRunner, cwd: &Path, request: &ListingRequest) -> Option<String> {
    let result = request.argv().and_then(|argv| runner.run(&argv, cwd));
    match result {
        Ok(out) => Some(out),
        Err(e) => {
            if let CommandError::NonZeroExit { stderr, .. } = &e {
                log::debug!("{} stderr: {}", request.tool, stderr.trim());
            }
            log::info!("no {} listing: {e}", request.tool);
            None
        }
    }
}

//! Chat-session bookkeeping.
//!
//! A [`ChatSession`] owns a per-session workspace and log directory, keeps
//! a bounded [`History`] with a selection cursor, totals token usage and
//! archives every turn as markdown. Talking to the model is the caller's
//! business; the session only records what came back.

pub mod archive;
pub mod history;

use std::path::{Path, PathBuf};

pub use archive::{archive_turn, render_turn, TurnRecord};
pub use history::{History, HistoryEvent};

use crate::error::Error;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;

/// Model the session is configured for.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Number of exchanges kept in the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Static settings of a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Model name the responses come from.
    pub model_name: String,
    /// Maximum number of exchanges kept in the history.
    pub history_limit: usize,
    /// Directory the per-session workspace is created in.
    pub workspace_parent: PathBuf,
    /// Directory the per-session log directory is placed in.
    pub log_directory: PathBuf,
}

impl SessionConfig {
    /// Default model and history limit with the given directories.
    pub fn new(workspace_parent: impl Into<PathBuf>, log_directory: impl Into<PathBuf>) -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            workspace_parent: workspace_parent.into(),
            log_directory: log_directory.into(),
        }
    }
}

/// Token usage reported for one response. Missing counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: Option<u64>,
    /// Tokens in the response.
    pub candidates_tokens: Option<u64>,
}

/// An index into the history together with the entry it points at.
pub type Selection<'h> = (usize, &'h HistoryEvent);

/// One conversation.
pub struct ChatSession<'a> {
    config: SessionConfig,
    id: String,
    workspace: PathBuf,
    log_directory: PathBuf,
    fs: &'a dyn FileSystem,
    clock: &'a dyn Clock,
    history: History,
    selected: usize,
    prompt_count: u64,
    prompt_token_count: u64,
    candidates_token_count: u64,
}

impl std::fmt::Debug for ChatSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("workspace", &self.workspace)
            .field("turns", &self.prompt_count)
            .finish_non_exhaustive()
    }
}

impl<'a> ChatSession<'a> {
    /// Starts a session and creates its workspace directory.
    ///
    /// The session id is `<YYYYMMDD_HHMMSS>_<id>`; it names both the
    /// workspace under `workspace_parent` and the log directory under
    /// `log_directory`. The log directory is created with the first archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the workspace cannot be created.
    pub fn new(
        config: SessionConfig,
        fs: &'a dyn FileSystem,
        clock: &'a dyn Clock,
        id_gen: &dyn IdGenerator,
    ) -> Result<Self, Error> {
        let started = clock.now().format("%Y%m%d_%H%M%S");
        let id = format!("{started}_{}", id_gen.generate_id());
        let workspace = config.workspace_parent.join(&id);
        let log_directory = config.log_directory.join(&id);

        fs.create_dir_all(&workspace)
            .map_err(|e| Error::io("creating session workspace", &workspace, e))?;
        log::info!("session {id} started in {}", workspace.display());

        Ok(Self {
            config,
            id,
            workspace,
            log_directory,
            fs,
            clock,
            history: History::new(),
            selected: 0,
            prompt_count: 0,
            prompt_token_count: 0,
            candidates_token_count: 0,
        })
    }

    /// Records a completed exchange, selects it and archives it.
    ///
    /// History and counters are updated before the archive is written, so
    /// an archive failure leaves the turn recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the turn archive cannot be written.
    pub fn record_turn(
        &mut self,
        prompt: &str,
        response: &str,
        usage: Option<TokenUsage>,
    ) -> Result<Selection<'_>, Error> {
        let usage = usage.unwrap_or_default();
        let input_tokens = usage.prompt_tokens.unwrap_or(0);
        let output_tokens = usage.candidates_tokens.unwrap_or(0);
        let now = self.clock.now();

        self.prompt_count += 1;
        self.prompt_token_count += input_tokens;
        self.candidates_token_count += output_tokens;

        self.history.add(HistoryEvent {
            prompt: prompt.to_string(),
            response: response.to_string(),
            prompt_token_count: input_tokens,
            candidates_token_count: output_tokens,
            timestamp: now,
        });
        self.history.truncate(self.config.history_limit);
        self.selected = self.history.len().saturating_sub(1);

        let turn = TurnRecord {
            sequence: self.prompt_count,
            prompt,
            response,
            input_tokens,
            output_tokens,
        };
        archive_turn(self.fs, &self.log_directory, now, &turn)?;

        self.selected().ok_or_else(|| {
            Error::Usage(format!("history limit {} keeps no turns", self.config.history_limit))
        })
    }

    /// The selected entry, `None` while the history is empty.
    #[must_use]
    pub fn selected(&self) -> Option<Selection<'_>> {
        self.history.get(self.selected).map(|event| (self.selected, event))
    }

    /// The newest entry.
    #[must_use]
    pub fn last(&self) -> Option<Selection<'_>> {
        let index = self.history.len().checked_sub(1)?;
        self.history.get(index).map(|event| (index, event))
    }

    /// Moves the selection one entry back. `None` at the oldest entry.
    pub fn select_previous(&mut self) -> Option<Selection<'_>> {
        if self.selected == 0 || self.history.is_empty() {
            return None;
        }
        self.selected -= 1;
        self.selected()
    }

    /// Moves the selection one entry forward. `None` at the newest entry.
    pub fn select_next(&mut self) -> Option<Selection<'_>> {
        if self.selected + 1 >= self.history.len() {
            return None;
        }
        self.selected += 1;
        self.selected()
    }

    /// Prompt of the selected entry.
    #[must_use]
    pub fn selected_prompt(&self) -> Option<&str> {
        self.selected().map(|(_, e)| e.prompt.as_str())
    }

    /// Response of the selected entry.
    #[must_use]
    pub fn selected_response(&self) -> Option<&str> {
        self.selected().map(|(_, e)| e.response.as_str())
    }

    /// Prompt of the newest entry.
    #[must_use]
    pub fn last_prompt(&self) -> Option<&str> {
        self.history.last().map(|e| e.prompt.as_str())
    }

    /// Response of the newest entry.
    #[must_use]
    pub fn last_response(&self) -> Option<&str> {
        self.history.last().map(|e| e.response.as_str())
    }

    /// Prompt tokens over the whole session, including truncated turns.
    #[must_use]
    pub fn prompt_token_count(&self) -> u64 {
        self.prompt_token_count
    }

    /// Response tokens over the whole session.
    #[must_use]
    pub fn candidates_token_count(&self) -> u64 {
        self.candidates_token_count
    }

    /// Prompt plus response tokens.
    #[must_use]
    pub fn total_token_count(&self) -> u64 {
        self.prompt_token_count + self.candidates_token_count
    }

    /// Number of turns recorded so far.
    #[must_use]
    pub fn prompt_count(&self) -> u64 {
        self.prompt_count
    }

    /// `<YYYYMMDD_HHMMSS>_<id>`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The session's working directory.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Where turn archives are written.
    #[must_use]
    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    /// Settings the session was started with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The kept exchanges.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
}

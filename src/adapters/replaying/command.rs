//! Replaying adapter for the `CommandRunner` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::command::{CommandError, CommandRunner};

/// Replays recorded command results from a cassette.
///
/// Each call must ask for the same argument vector that was recorded at
/// that position; a mismatch means the cassette no longer describes the
/// code path and is reported as a fault rather than served.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next(&self, program: &str) -> Result<Interaction, CommandError> {
        let mut replayer = self.replayer.lock().map_err(|e| CommandError::Fault {
            program: program.to_string(),
            message: format!("replayer lock poisoned: {e}"),
        })?;
        replayer
            .next_interaction("command", "run")
            .map_err(|e| CommandError::Fault { program: program.to_string(), message: e.to_string() })
    }
}

impl CommandRunner for ReplayingCommandRunner {
    fn run(&self, argv: &[String], _cwd: &Path) -> Result<String, CommandError> {
        let program = argv.first().cloned().unwrap_or_default();
        let interaction = self.next(&program)?;

        let recorded: Option<Vec<String>> =
            serde_json::from_value(interaction.input["argv"].clone()).ok();
        if recorded.as_deref() != Some(argv) {
            return Err(CommandError::Fault {
                program,
                message: format!(
                    "cassette seq {} recorded {}, replay asked for {argv:?}",
                    interaction.seq, interaction.input["argv"]
                ),
            });
        }

        let output = interaction.output;
        if let Some(err) = output.get("Err") {
            return Err(serde_json::from_value(err.clone()).unwrap_or_else(|e| {
                CommandError::Fault { program: program.clone(), message: format!("bad cassette error: {e}") }
            }));
        }
        output.get("Ok").and_then(serde_json::Value::as_str).map(str::to_string).ok_or_else(|| {
            CommandError::Fault {
                program,
                message: format!("cassette seq {} has no Ok/Err output", interaction.seq),
            }
        })
    }
}

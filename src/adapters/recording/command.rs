//! Recording adapter for the `CommandRunner` port.

use std::path::Path;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::command::{CommandError, CommandRunner};

/// Records every command and its outcome while delegating to an inner runner.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: SharedRecorder,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandRunner>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    argv: &'a [String],
    cwd: &'a Path,
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> Result<String, CommandError> {
        let result = self.inner.run(argv, cwd);
        record_result(&self.recorder, "command", "run", &RunInput { argv, cwd }, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::LiveCommandRunner;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::command::argv;

    #[test]
    fn records_successes_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("command.cassette.yaml");
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "/repo")));

        {
            let runner =
                RecordingCommandRunner::new(Box::new(LiveCommandRunner), Arc::clone(&recorder));
            assert_eq!(runner.run(&argv(&["echo", "hello"]), dir.path()).unwrap(), "hello");
            assert!(runner.run(&argv(&["no-such-tool-7731"]), dir.path()).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette =
            Cassette::from_yaml(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input["argv"][0], "echo");
        assert_eq!(cassette.interactions[0].output["Ok"], "hello");
        assert_eq!(cassette.interactions[1].output["Err"]["kind"], "not_found");
    }
}

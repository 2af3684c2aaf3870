//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::Error;

/// Shared handle to one port's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Owns one `CassetteRecorder` per port for the lifetime of a recording.
///
/// Cassettes land in a timestamped directory below the chosen root, one
/// `<port>.cassette.yaml` file each.
pub struct RecordingSession {
    /// Recorder for external command interactions.
    pub command: SharedRecorder,
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    /// Recorder for ID generator interactions.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a recording session under `root/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped directory already exists or
    /// cannot be created.
    pub fn new(root: &Path, repository: &Path) -> Result<Self, Error> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Recording(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| Error::io("creating cassette directory", &output_dir, e))?;

        let repository = repository.display().to_string();
        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(
                path,
                format!("{timestamp}-{port}"),
                repository.clone(),
            )))
        };

        Ok(Self {
            command: make_recorder("command"),
            clock: make_recorder("clock"),
            id_gen: make_recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory the cassettes will be written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette file and return the output directory.
    ///
    /// All recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, Error> {
        fn finish_one(shared: SharedRecorder, port: &str) -> Result<(), Error> {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| {
                    Error::Recording(format!("recording adapter for {port} still has references"))
                })?
                .into_inner()
                .map_err(|e| Error::Recording(format!("recorder lock for {port} poisoned: {e}")))?;
            if recorder.is_empty() {
                log::debug!("no {port} interactions recorded");
            }
            recorder
                .finish()
                .map_err(|e| Error::Recording(format!("failed to write {port} cassette: {e}")))?;
            Ok(())
        }

        finish_one(self.command, "command")?;
        finish_one(self.clock, "clock")?;
        finish_one(self.id_gen, "id_gen")?;
        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let root = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(root.path(), Path::new("/repo")).unwrap();
        let dir = session.output_dir().to_path_buf();
        assert!(dir.exists());

        let written = session.finish().unwrap();
        assert_eq!(written, dir);
        for port in ["command", "clock", "id_gen"] {
            assert!(dir.join(format!("{port}.cassette.yaml")).exists(), "{port} cassette missing");
        }
    }

    #[test]
    fn finish_fails_while_a_recorder_is_shared() {
        let root = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(root.path(), Path::new("/repo")).unwrap();
        let _held = Arc::clone(&session.command);

        let err = session.finish().unwrap_err();
        assert!(err.to_string().contains("command still has references"));
    }
}

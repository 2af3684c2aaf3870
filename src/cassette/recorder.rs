//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    repository: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            repository: repository.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record an interaction. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction {
            seq: self.next_seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self) -> std::io::Result<PathBuf> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            repository: self.repository,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/command.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "report", "/work/project");
        assert!(recorder.is_empty());
        recorder.record("command", "run", json!({"argv": ["git"]}), json!({"Ok": ""}));
        recorder.record("clock", "now", json!(null), json!("2025-01-01T00:00:00"));
        recorder.record("id_gen", "generate_id", json!(null), json!("id-1"));
        assert_eq!(recorder.len(), 3);

        let written = recorder.finish().expect("finish should succeed");
        assert_eq!(written, path);

        let cassette = Cassette::from_yaml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.name, "report");
        assert_eq!(cassette.repository, "/work/project");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(cassette.interactions[2].port, "id_gen");
    }
}

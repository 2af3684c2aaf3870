//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::Error;

/// Per-port cassette file paths. Ports without a cassette fall back to
/// their live adapter when a replaying context is built.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the command port cassette file.
    pub command: Option<PathBuf>,
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the ID generator port cassette file.
    pub id_gen: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
#[derive(Debug)]
pub struct PortReplayers {
    /// Replayer for the command port.
    pub command: Option<CassetteReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Uses one cassette file for every port.
    #[must_use]
    pub fn monolithic(path: &Path) -> Self {
        Self {
            command: Some(path.to_path_buf()),
            clock: Some(path.to_path_buf()),
            id_gen: Some(path.to_path_buf()),
        }
    }

    /// Load a cassette file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<Cassette, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io("reading cassette", path, e))?;
        Cassette::from_yaml(&content)
            .map_err(|source| Error::CassetteParse { path: path.to_path_buf(), source })
    }

    /// Load every configured cassette file and create one replayer per port.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, Error> {
        let load = |path: &Option<PathBuf>| -> Result<Option<CassetteReplayer>, Error> {
            path.as_deref()
                .map(|p| Self::load_cassette(p).map(|c| CassetteReplayer::new(&c)))
                .transpose()
        };
        Ok(PortReplayers {
            command: load(&self.command)?,
            clock: load(&self.clock)?,
            id_gen: load(&self.id_gen)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn default_config_loads_nothing() {
        let replayers = CassetteConfig::default().load_all().unwrap();
        assert!(replayers.command.is_none());
        assert!(replayers.clock.is_none());
        assert!(replayers.id_gen.is_none());
    }

    #[test]
    fn monolithic_cassette_feeds_every_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "session", "/repo");
        recorder.record("command", "run", json!({"argv": ["git"]}), json!({"Ok": "true"}));
        recorder.record("clock", "now", json!(null), json!("2025-03-15T14:30:00"));
        recorder.finish().unwrap();

        let mut replayers = CassetteConfig::monolithic(&path).load_all().unwrap();
        let command = replayers.command.as_mut().unwrap();
        assert_eq!(command.next_interaction("command", "run").unwrap().output["Ok"], "true");
        let clock = replayers.clock.as_mut().unwrap();
        assert!(clock.next_interaction("clock", "now").is_ok());
    }

    #[test]
    fn unparseable_cassette_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.cassette.yaml");
        std::fs::write(&path, "interactions: [not, a, cassette").unwrap();

        let config = CassetteConfig { command: Some(path.clone()), ..CassetteConfig::default() };
        let err = config.load_all().unwrap_err();
        assert!(matches!(err, Error::CassetteParse { .. }));
        assert!(err.to_string().contains("broken.cassette.yaml"));
    }

    #[test]
    fn missing_cassette_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = CassetteConfig {
            clock: Some(dir.path().join("absent.yaml")),
            ..CassetteConfig::default()
        };
        assert!(matches!(config.load_all().unwrap_err(), Error::Io { .. }));
    }
}

//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveClock, LiveCommandRunner, LiveFileSystem, LiveIdGenerator};
use crate::adapters::recording::{RecordingClock, RecordingCommandRunner, RecordingIdGenerator};
use crate::adapters::replaying::{ReplayingClock, ReplayingCommandRunner, ReplayingIdGenerator};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::error::Error;
use crate::ports::clock::Clock;
use crate::ports::command::CommandRunner;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up live, recording or replaying adapters. The
/// filesystem is always live: what the crate writes (archives, extracted
/// scripts) is output, not input a replay has to reproduce.
pub struct ServiceContext {
    /// Runs `git`, listing tools and scripts.
    pub command: Box<dyn CommandRunner>,
    /// Current local time.
    pub clock: Box<dyn Clock>,
    /// File I/O.
    pub fs: Box<dyn FileSystem>,
    /// Unique identifiers.
    pub id_gen: Box<dyn IdGenerator>,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Creates a context backed by the real system.
    #[must_use]
    pub fn live() -> Self {
        Self {
            command: Box::new(LiveCommandRunner),
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
        }
    }

    /// Creates a live context whose command, clock and id interactions are
    /// recorded below `root`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] is
    /// called, since the recording adapters hold the shared recorders.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(root: &Path, repository: &Path) -> Result<(Self, RecordingSession), Error> {
        let session = RecordingSession::new(root, repository)?;
        let ctx = Self {
            command: Box::new(RecordingCommandRunner::new(
                Box::new(LiveCommandRunner),
                Arc::clone(&session.command),
            )),
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(RecordingIdGenerator::new(
                Box::new(LiveIdGenerator),
                Arc::clone(&session.id_gen),
            )),
        };
        log::info!("recording interactions to {}", session.output_dir().display());
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, Error> {
        Self::replaying_from(&CassetteConfig::monolithic(path))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use their live adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, Error> {
        let replayers = config.load_all()?;

        Ok(Self {
            command: match replayers.command {
                Some(r) => Box::new(ReplayingCommandRunner::new(r)),
                None => Box::new(LiveCommandRunner),
            },
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(LiveClock),
            },
            fs: Box::new(LiveFileSystem),
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(LiveIdGenerator),
            },
        })
    }
}

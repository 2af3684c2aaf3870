//! Replays recorded interactions from a cassette.

use std::collections::{BTreeMap, VecDeque};

use thiserror::Error;

use super::format::{Cassette, Interaction};

/// A replay request the cassette cannot satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Nothing was ever recorded for this port/method pair.
    #[error("no interactions recorded for {port}::{method}; available: [{available}]")]
    Unrecorded {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Comma-separated `port::method` pairs the cassette does contain.
        available: String,
    },
    /// Every recorded interaction for the pair has already been served.
    #[error("cassette exhausted: all {count} interactions for {port}::{method} consumed")]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// How many were recorded.
        count: usize,
    },
}

#[derive(Debug)]
struct Stream {
    pending: VecDeque<Interaction>,
    recorded: usize,
}

/// Serves interactions from a loaded cassette, in recording order, per
/// port/method pair. Streams are independent: consuming `command::run`
/// entries does not advance `clock::now`.
#[derive(Debug)]
pub struct CassetteReplayer {
    streams: BTreeMap<(String, String), Stream>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: BTreeMap<(String, String), Stream> = BTreeMap::new();
        for interaction in &cassette.interactions {
            let stream = streams
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_insert_with(|| Stream { pending: VecDeque::new(), recorded: 0 });
            stream.pending.push_back(interaction.clone());
            stream.recorded += 1;
        }
        Self { streams }
    }

    /// Take the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when the pair was never recorded or its
    /// stream has been used up.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
    ) -> Result<Interaction, ReplayError> {
        let key = (port.to_string(), method.to_string());
        match self.streams.get_mut(&key) {
            Some(stream) => stream.pending.pop_front().ok_or_else(|| ReplayError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                count: stream.recorded,
            }),
            None => {
                let available: Vec<String> =
                    self.streams.keys().map(|(p, m)| format!("{p}::{m}")).collect();
                Err(ReplayError::Unrecorded {
                    port: port.to_string(),
                    method: method.to_string(),
                    available: available.join(", "),
                })
            }
        }
    }

    /// Interactions not yet served, across all streams.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.streams.values().map(|s| s.pending.len()).sum()
    }
}

//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::NaiveDateTime;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics if the cassette has no usable `clock::now` entry left; a
    /// replay that reads the clock more often than the recording did cannot
    /// reproduce it.
    fn now(&self) -> NaiveDateTime {
        let interaction = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_interaction("clock", "now").unwrap_or_else(|e| panic!("clock::now: {e}"))
        };
        serde_json::from_value(interaction.output)
            .unwrap_or_else(|e| panic!("clock::now: seq {} is not a timestamp: {e}", interaction.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(outputs: &[&str]) -> CassetteReplayer {
        let interactions = outputs
            .iter()
            .enumerate()
            .map(|(seq, ts)| Interaction {
                seq: seq as u64,
                port: "clock".into(),
                method: "now".into(),
                input: json!(null),
                output: json!(ts),
            })
            .collect();
        CassetteReplayer::new(&Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            repository: "/repo".into(),
            interactions,
        })
    }

    #[test]
    fn serves_recorded_times_in_order() {
        let clock = ReplayingClock::new(make_replayer(&["2024-01-01T00:00:00", "2024-01-01T00:01:00"]));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first.format("%Y%m%d_%H%M%S").to_string(), "20240101_000000");
        assert!(second > first);
    }

    #[test]
    #[should_panic(expected = "cassette exhausted")]
    fn panics_when_cassette_runs_out() {
        let clock = ReplayingClock::new(make_replayer(&["2024-01-01T00:00:00"]));
        let _ = clock.now();
        let _ = clock.now();
    }
}

//! Replaying adapter for the `IdGenerator` port.

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::id_gen::IdGenerator;

/// Replays recorded IDs from a cassette.
pub struct ReplayingIdGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIdGenerator {
    /// Creates a new replaying ID generator from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IdGenerator for ReplayingIdGenerator {
    /// # Panics
    ///
    /// Panics if the cassette has no string `id_gen::generate_id` entry left.
    fn generate_id(&self) -> String {
        let interaction = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer
                .next_interaction("id_gen", "generate_id")
                .unwrap_or_else(|e| panic!("id_gen::generate_id: {e}"))
        };
        match interaction.output.as_str() {
            Some(id) => id.to_string(),
            None => panic!("id_gen::generate_id: seq {} is not a string", interaction.seq),
        }
    }
}

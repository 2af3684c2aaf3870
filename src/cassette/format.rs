//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`command`, `clock`, `id_gen`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Working directory the recording was made from.
    pub repository: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses a cassette from its YAML form.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the document is not a valid cassette.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Number of interactions recorded for one port.
    #[must_use]
    pub fn count_for(&self, port: &str) -> usize {
        self.interactions.iter().filter(|i| i.port == port).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cassette() -> Cassette {
        Cassette {
            name: "report-head".into(),
            recorded_at: Utc::now(),
            repository: "/work/project".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "command".into(),
                    method: "run".into(),
                    input: json!({"argv": ["git", "rev-parse", "HEAD"], "cwd": "/work/project"}),
                    output: json!({"Ok": "4f2a9c1"}),
                },
                Interaction {
                    seq: 1,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2025-03-15T14:30:00"),
                },
            ],
        }
    }

    #[test]
    fn yaml_round_trip_preserves_interactions() {
        let cassette = sample_cassette();
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let parsed = Cassette::from_yaml(&yaml).expect("deserialize");
        assert_eq!(cassette, parsed);
    }

    #[test]
    fn counts_interactions_per_port() {
        let cassette = sample_cassette();
        assert_eq!(cassette.count_for("command"), 1);
        assert_eq!(cassette.count_for("clock"), 1);
        assert_eq!(cassette.count_for("id_gen"), 0);
    }
}

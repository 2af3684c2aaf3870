//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Live ID generator that produces random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveIdGenerator;

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_distinct_parseable_uuids() {
        let gen = LiveIdGenerator;
        let first = gen.generate_id();
        let second = gen.generate_id();

        assert_ne!(first, second);
        let parsed = Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }
}

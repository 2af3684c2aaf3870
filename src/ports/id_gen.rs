//! ID generator port for producing unique session identifiers.

/// Generates unique identifiers.
///
/// Session directories embed a generated id; replaying a recorded id keeps
/// archive paths stable across runs.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}

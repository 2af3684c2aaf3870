//! Clock port for obtaining the current wall-clock time.

use chrono::NaiveDateTime;

/// Provides the current local wall-clock time.
///
/// Session ids and turn archives are stamped with local time; a fixed or
/// recorded clock keeps them reproducible in tests and cassette playback.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time, without an offset.
    fn now(&self) -> NaiveDateTime;
}

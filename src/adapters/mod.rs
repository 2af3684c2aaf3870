//! Adapter implementations of the port traits.
//!
//! `live` talks to the real system, `recording` wraps a live adapter and
//! captures each interaction to a cassette, `replaying` serves interactions
//! back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;

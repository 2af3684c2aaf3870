//! Cassettes: recorded port interactions for deterministic replay.
//!
//! A cassette captures every external command a report touched (git, tree,
//! du) plus clock and id values, so a report can be regenerated byte for
//! byte without the repository that produced it.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

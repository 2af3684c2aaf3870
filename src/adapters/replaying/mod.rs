//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod command;
pub mod id_gen;

pub use clock::ReplayingClock;
pub use command::ReplayingCommandRunner;
pub use id_gen::ReplayingIdGenerator;

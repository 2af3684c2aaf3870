//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reporting core and an
//! external system (processes, filesystem, time, IDs).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod command;
pub mod filesystem;
pub mod id_gen;

pub use clock::Clock;
pub use command::{CommandError, CommandRunner};
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;

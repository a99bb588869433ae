//! Core traits and types for cycle-accurate peripheral simulation.
//!
//! Everything advances at the system clock frequency. All component timing
//! derives from this. No exceptions.

mod clock;
mod observable;
mod tickable;
mod ticks;

pub use clock::MasterClock;
pub use observable::{Observable, Value};
pub use tickable::Tickable;
pub use ticks::Ticks;

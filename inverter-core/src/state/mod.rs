//! Lifecycle state machine
//!
//! The controller's state is a function of the previous state and an event.
//! Transitions are explicit, finite and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{State, SweepState};

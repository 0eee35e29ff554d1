//! Configuration types
//!
//! Board-agnostic configuration structures. Configuration is a value chosen
//! at startup; nothing is persisted.

pub mod types;

pub use types::*;

//! Board-agnostic core logic for the Inverter watchapp
//!
//! This crate contains all application logic that does not depend on a
//! specific host platform:
//!
//! - Clock display controller (setup, minute tick, teardown)
//! - `HH:MM` time formatting into a fixed buffer
//! - Lifecycle state machine
//! - Configuration types and the three revision presets
//! - Application entry point driving the host event loop

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod controller;
pub mod state;
pub mod time;

#[cfg(test)]
mod mock;

pub use app::run;
pub use controller::{ClockController, ControllerError};

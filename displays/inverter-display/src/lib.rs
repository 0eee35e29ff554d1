//! Software host for the Inverter watchapp
//!
//! This crate provides a complete implementation of the `inverter-hal`
//! services that only needs a small board seam:
//! - `Scene` retained window stack and layer tree
//! - `Animator` frame animations with timing curves
//! - `Framebuffer` 128x64 page-organized monochrome buffer
//! - `render` compositor with text and inverter layers
//! - `SoftHost` tying it together behind a frame-paced event loop
//!
//! # Architecture
//!
//! Boards implement [`Platform`] (frame pacing, wall clock, panel flush).
//! The application talks to [`SoftHost`] through the host traits only and
//! never sees the platform.
//!
//! ```text
//! app ──HostServices──▶ SoftHost ──render──▶ Framebuffer ──present──▶ Platform
//!  ▲                       │
//!  └──────HostEvent────────┘ (ticks, animation stops)
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod animator;
pub mod framebuffer;
pub mod host;
pub mod platform;
pub mod render;
pub mod scene;

// Re-export key types
pub use animator::Animator;
pub use framebuffer::{Framebuffer, HEIGHT, PAGES, WIDTH};
pub use host::SoftHost;
pub use platform::Platform;
pub use render::render;
pub use scene::{LayerKind, Scene};

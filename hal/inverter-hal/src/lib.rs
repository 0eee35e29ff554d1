//! Inverter Host Abstraction Layer
//!
//! This crate defines the services a watch platform offers to the
//! application: a window stack, retained layers, frame animations, a
//! wall-clock tick timer and the event loop that dispatches them. The
//! application is written against these traits only, so the same code runs
//! on the firmware host and on mock hosts in unit tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (inverter-core)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  inverter-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   inverter-   │       │  mock hosts   │
//! │    display    │       │  (unit tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`window::WindowService`] - Window creation and the window stack
//! - [`layer::LayerService`], [`layer::TextLayerService`],
//!   [`layer::InverterLayerService`] - Retained layer tree
//! - [`animation::AnimationService`] - Frame (property) animations
//! - [`tick::TickService`] - Wall-clock tick subscription
//! - [`event::EventLoop`] - Event delivery to the application

#![no_std]
#![deny(unsafe_code)]

pub mod animation;
pub mod event;
pub mod geometry;
pub mod layer;
pub mod tick;
pub mod window;

// Re-export key types at crate root for convenience
pub use animation::{AnimationCurve, AnimationId, AnimationService, FrameAnimation};
pub use event::{EventLoop, HostEvent};
pub use geometry::{Color, Rect};
pub use layer::{
    FontKey, InverterLayerService, LayerId, LayerService, TextAlignment, TextLayerService,
    TextStyle,
};
pub use tick::{LocalTime, TickService, TimeUnits};
pub use window::{WindowId, WindowService};

/// Errors reported by host services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Handle does not refer to a live object
    InvalidHandle,
    /// No free slot for a new object
    OutOfResources,
    /// Operation applied to a layer of the wrong kind
    WrongLayerKind,
    /// Tick timer already has a subscriber
    AlreadySubscribed,
    /// Tick timer has no subscriber
    NotSubscribed,
}

/// Every UI service the application uses during setup, ticks and teardown
pub trait HostServices:
    WindowService
    + TextLayerService
    + InverterLayerService
    + AnimationService
    + TickService
{
}

// Blanket implementation
impl<T> HostServices for T where
    T: WindowService + TextLayerService + InverterLayerService + AnimationService + TickService
{
}

/// A complete host: UI services plus the event loop
pub trait Host: HostServices + EventLoop {}

// Blanket implementation
impl<T: HostServices + EventLoop> Host for T {}

//! Frame animation abstractions
//!
//! A frame animation moves a layer from one frame to another over a fixed
//! duration. Scheduling starts (or restarts) it; the host reports completion
//! through [`crate::HostEvent::AnimationStopped`].

use crate::geometry::Rect;
use crate::layer::LayerId;
use crate::HostError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a host animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationId(u8);

impl AnimationId {
    /// Wrap a raw host slot number
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw host slot number
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Timing curve mapping elapsed time to progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimationCurve {
    /// Constant speed
    Linear,
    /// Slow start
    EaseIn,
    /// Slow finish
    EaseOut,
    /// Slow start and finish
    #[default]
    EaseInOut,
}

/// Description of a layer frame animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameAnimation {
    /// Layer whose frame is animated
    pub layer: LayerId,
    /// Frame at progress 0
    pub from: Rect,
    /// Frame at progress 1
    pub to: Rect,
    /// Run time in milliseconds
    pub duration_ms: u32,
    /// Timing curve
    pub curve: AnimationCurve,
}

/// Frame animation scheduling
pub trait AnimationService {
    /// Create an animation (not yet scheduled)
    fn frame_animation_create(&mut self, params: &FrameAnimation) -> Result<AnimationId, HostError>;

    /// Start the animation from its `from` frame
    ///
    /// Scheduling an animation that is already running is host-defined;
    /// callers that need a clean restart unschedule first.
    fn animation_schedule(&mut self, animation: AnimationId) -> Result<(), HostError>;

    /// Stop a running animation where it is
    ///
    /// Unscheduling an idle animation is a no-op.
    fn animation_unschedule(&mut self, animation: AnimationId) -> Result<(), HostError>;

    /// Check if the animation is currently running
    fn animation_is_scheduled(&self, animation: AnimationId) -> bool;

    /// Destroy an animation (unscheduling it first if needed)
    fn animation_destroy(&mut self, animation: AnimationId) -> Result<(), HostError>;
}

//! Window stack abstractions

use crate::geometry::Color;
use crate::layer::LayerId;
use crate::HostError;

/// Handle to a host window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowId(u8);

impl WindowId {
    /// Wrap a raw host slot number
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw host slot number
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Window creation and the window stack
///
/// A window owns a root layer that spans the screen. Pushing a window makes
/// it the visible (topmost) one.
pub trait WindowService {
    /// Create a new window with a black background
    fn window_create(&mut self) -> Result<WindowId, HostError>;

    /// Push a window onto the stack
    ///
    /// `animated` requests the platform's slide-in transition where one
    /// exists.
    fn window_push(&mut self, window: WindowId, animated: bool) -> Result<(), HostError>;

    /// Set the color the window is cleared to before its layers draw
    fn window_set_background(&mut self, window: WindowId, color: Color) -> Result<(), HostError>;

    /// Get the root layer of a window
    fn window_root_layer(&self, window: WindowId) -> Result<LayerId, HostError>;

    /// Destroy a window (removing it from the stack if present)
    fn window_destroy(&mut self, window: WindowId) -> Result<(), HostError>;
}

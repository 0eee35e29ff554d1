//! Board seam of the software host
//!
//! A platform supplies frame pacing, wall-clock time and a way to get the
//! composited framebuffer onto the panel. Everything else is shared.

use core::future::Future;

use inverter_hal::LocalTime;

use crate::framebuffer::Framebuffer;

/// Board services needed by [`crate::SoftHost`]
pub trait Platform {
    /// Wait for the next frame
    ///
    /// Returns the monotonic time in milliseconds, or `None` when the
    /// application should exit.
    fn next_frame(&mut self) -> impl Future<Output = Option<u32>>;

    /// Current local wall-clock time
    fn local_time(&self) -> LocalTime;

    /// Show a composited frame
    fn present(&mut self, frame: &Framebuffer) -> impl Future<Output = ()>;
}

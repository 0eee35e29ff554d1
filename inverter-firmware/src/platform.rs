//! Board platform for the software host
//!
//! Frames are paced by an embassy ticker. Wall-clock time is the build-time
//! epoch plus uptime, shifted by the configured UTC offset. Presented frames
//! are handed to the display task, which owns the I2C bus.

use chrono::{DateTime, Timelike};
use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};
use inverter_display::{Framebuffer, Platform};
use inverter_hal::LocalTime;

use crate::config::{BUILD_EPOCH, FRAME_INTERVAL_MS, UTC_OFFSET_MINUTES};

/// Latest composited frame
pub static FRAME: Mutex<CriticalSectionRawMutex, Framebuffer> = Mutex::new(Framebuffer::new());

/// Raised when [`FRAME`] holds a frame not yet sent to the panel
pub static DISPLAY_REFRESH: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// RP2040 board with an SH1106 panel
pub struct BoardPlatform {
    ticker: Ticker,
    start: Instant,
    /// Seconds added to the UTC epoch
    offset_secs: i64,
}

impl BoardPlatform {
    pub fn new() -> Self {
        info!(
            "Clock base {}, UTC offset {} min, frame every {} ms",
            BUILD_EPOCH, UTC_OFFSET_MINUTES, FRAME_INTERVAL_MS
        );

        Self {
            ticker: Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS)),
            start: Instant::now(),
            offset_secs: UTC_OFFSET_MINUTES as i64 * 60,
        }
    }
}

impl Platform for BoardPlatform {
    async fn next_frame(&mut self) -> Option<u32> {
        self.ticker.next().await;
        Some(self.start.elapsed().as_millis() as u32)
    }

    fn local_time(&self) -> LocalTime {
        let secs = BUILD_EPOCH + self.offset_secs + Instant::now().as_secs() as i64;
        DateTime::from_timestamp(secs, 0)
            .map(|t| t.time())
            .and_then(|t| LocalTime::new(t.hour() as u8, t.minute() as u8, t.second() as u8))
            .unwrap_or(LocalTime::MIDNIGHT)
    }

    async fn present(&mut self, frame: &Framebuffer) {
        *FRAME.lock().await = frame.clone();
        DISPLAY_REFRESH.signal(());
        trace!("Frame presented");
    }
}

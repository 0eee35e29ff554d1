//! Configuration type definitions
//!
//! These types describe one watchapp instance: which revision's behavior to
//! follow, where the label sits, and how the inverting sweep runs.

use inverter_hal::{AnimationCurve, Color, FontKey, Rect, TextAlignment, TextStyle, TimeUnits};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sweep duration of revision 1 (one full minute)
pub const V1_SWEEP_DURATION_MS: u32 = 60_000;

/// Sweep duration of revision 2 (finishes a second before the next tick)
pub const V2_SWEEP_DURATION_MS: u32 = 59_000;

/// Watchapp revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Revision {
    /// 60 s sweep, rescheduled on every tick without cancelling
    V1,
    /// 59 s sweep, cancelled and restarted on every tick
    #[default]
    V2,
    /// Plain clock, no sweep
    V3,
}

/// How a tick restarts the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RestartPolicy {
    /// Schedule only; an in-flight run is left to the host
    Reschedule,
    /// Unschedule first so the sweep always restarts from its first frame
    #[default]
    CancelThenRestart,
}

/// Which objects deactivation releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TeardownPolicy {
    /// Unsubscribe the tick timer and destroy every created object
    #[default]
    Full,
    /// Unsubscribe the tick timer only; UI objects stay live
    TimerOnly,
}

/// Inverting sweep configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepConfig {
    /// Time for the overlay to slide off the screen
    pub duration_ms: u32,
    /// Timing curve
    pub curve: AnimationCurve,
    /// Tick restart behavior
    pub restart: RestartPolicy,
}

impl SweepConfig {
    /// Start and end frames of the overlay for a given screen
    ///
    /// The overlay starts covering the whole screen and ends shifted down by
    /// one pixel less than the screen height, leaving its top row visible.
    pub fn frames(&self, screen: Rect) -> (Rect, Rect) {
        let from = screen;
        let shift = screen.h.saturating_sub(1).min(i16::MAX as u16) as i16;
        let to = Rect::new(screen.x, screen.y.saturating_add(shift), screen.w, screen.h);
        (from, to)
    }
}

/// Screen and label layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Full screen frame
    pub screen: Rect,
    /// Window background color
    pub background: Color,
    /// Label frame, relative to the window
    pub label_frame: Rect,
    /// Label style
    pub label_style: TextStyle,
}

impl LayoutConfig {
    /// Label style shared by every layout: white bold digits, centered
    pub const LABEL_STYLE: TextStyle = TextStyle {
        color: Color::White,
        background: Color::Clear,
        font: FontKey::RobotoBoldSubset49,
        alignment: TextAlignment::Center,
    };

    /// 144x168 layout with the label roughly centered
    pub const fn pebble() -> Self {
        Self {
            screen: Rect::screen(144, 168),
            background: Color::Black,
            label_frame: Rect::new(0, 54, 144, 64),
            label_style: Self::LABEL_STYLE,
        }
    }

    /// 128x64 OLED layout
    pub const fn oled_128x64() -> Self {
        Self {
            screen: Rect::screen(128, 64),
            background: Color::Black,
            label_frame: Rect::new(0, 16, 128, 32),
            label_style: Self::LABEL_STYLE,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::pebble()
    }
}

/// Complete watchapp configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Revision the configuration was derived from
    pub revision: Revision,
    /// Layout
    pub layout: LayoutConfig,
    /// Sweep, or `None` for a plain clock
    pub sweep: Option<SweepConfig>,
    /// Deactivation behavior
    pub teardown: TeardownPolicy,
    /// Tick subscription unit
    pub tick_unit: TimeUnits,
}

impl ClockConfig {
    /// Preset for a revision
    ///
    /// Every preset uses full teardown; see [`ClockConfig::with_teardown`]
    /// for the timer-only variant.
    pub fn for_revision(revision: Revision) -> Self {
        let sweep = match revision {
            Revision::V1 => Some(SweepConfig {
                duration_ms: V1_SWEEP_DURATION_MS,
                curve: AnimationCurve::Linear,
                restart: RestartPolicy::Reschedule,
            }),
            Revision::V2 => Some(SweepConfig {
                duration_ms: V2_SWEEP_DURATION_MS,
                curve: AnimationCurve::Linear,
                restart: RestartPolicy::CancelThenRestart,
            }),
            Revision::V3 => None,
        };

        Self {
            revision,
            layout: LayoutConfig::pebble(),
            sweep,
            teardown: TeardownPolicy::Full,
            tick_unit: TimeUnits::MINUTE,
        }
    }

    /// Replace the layout
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the sweep restart policy (no effect without a sweep)
    pub fn with_restart_policy(mut self, restart: RestartPolicy) -> Self {
        if let Some(sweep) = self.sweep.as_mut() {
            sweep.restart = restart;
        }
        self
    }

    /// Replace the sweep duration (no effect without a sweep)
    pub fn with_sweep_duration(mut self, duration_ms: u32) -> Self {
        if let Some(sweep) = self.sweep.as_mut() {
            sweep.duration_ms = duration_ms;
        }
        self
    }

    /// Replace the teardown policy
    pub fn with_teardown(mut self, teardown: TeardownPolicy) -> Self {
        self.teardown = teardown;
        self
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::for_revision(Revision::default())
    }
}

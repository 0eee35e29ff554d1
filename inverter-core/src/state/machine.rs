//! State machine definition
//!
//! ```text
//! Uninitialized ──Activated──▶ Active(Idle) ──SweepStarted──▶ Active(Running)
//!                                   ▲                              │
//!                                   └─────────SweepStopped─────────┘
//! Active(_) ──Deactivated──▶ Terminated ──Activated──▶ Active(Idle)
//! ```

use super::events::Event;

/// Sweep animation phase while active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepState {
    /// No sweep in flight
    Idle,
    /// Sweep in flight
    Running,
}

/// Controller lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, nothing created on the host yet
    #[default]
    Uninitialized,
    /// UI objects live, receiving ticks
    Active(SweepState),
    /// Torn down after the host's exit request
    Terminated,
}

impl State {
    /// Check if the controller is receiving ticks
    pub fn is_active(&self) -> bool {
        matches!(self, State::Active(_))
    }

    /// Check if a sweep is in flight
    pub fn sweep_running(&self) -> bool {
        matches!(self, State::Active(SweepState::Running))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Setup (again, after a previous teardown)
            (Uninitialized, Activated) => Active(SweepState::Idle),
            (Terminated, Activated) => Active(SweepState::Idle),

            // Sweep lifecycle
            (Active(_), SweepStarted) => Active(SweepState::Running),
            (Active(SweepState::Running), SweepStopped) => Active(SweepState::Idle),

            // Teardown
            (Active(_), Deactivated) => Terminated,

            // Default: stay in current state
            _ => self,
        }
    }
}

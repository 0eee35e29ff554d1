//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Setup completed and the tick subscription is live
    Activated,
    /// Tick subscription released
    Deactivated,

    // Sweep events
    /// Sweep animation scheduled
    SweepStarted,
    /// Sweep animation finished or was cancelled
    SweepStopped,
}

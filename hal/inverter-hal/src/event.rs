//! Event delivery to the application

use core::future::Future;

use crate::animation::AnimationId;
use crate::tick::{LocalTime, TimeUnits};

/// Events the host dispatches to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// Subscribed wall-clock unit elapsed
    Tick {
        /// Current local time
        time: LocalTime,
        /// Units that changed since the previous tick
        changed: TimeUnits,
    },
    /// A scheduled animation stopped
    AnimationStopped {
        /// Animation that stopped
        animation: AnimationId,
        /// `true` if it ran to its end, `false` if it was unscheduled
        finished: bool,
    },
}

/// The host event loop
///
/// Events are delivered one at a time; the application handles each to
/// completion before asking for the next, so handlers never overlap.
pub trait EventLoop {
    /// Wait for the next event
    ///
    /// Returns `None` when the host asks the application to exit.
    fn next_event(&mut self) -> impl Future<Output = Option<HostEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Script {
        events: [Option<HostEvent>; 2],
        index: usize,
    }

    impl EventLoop for Script {
        async fn next_event(&mut self) -> Option<HostEvent> {
            let event = self.events.get(self.index).copied().flatten();
            self.index += 1;
            event
        }
    }

    #[test]
    fn test_event_loop_ends_with_none() {
        let tick = HostEvent::Tick {
            time: LocalTime::new(9, 5, 0).unwrap(),
            changed: TimeUnits::MINUTE,
        };
        let mut script = Script {
            events: [Some(tick), None],
            index: 0,
        };

        let first = embassy_futures::block_on(script.next_event());
        assert_eq!(first, Some(tick));
        assert_eq!(embassy_futures::block_on(script.next_event()), None);
        assert_eq!(embassy_futures::block_on(script.next_event()), None);
    }
}

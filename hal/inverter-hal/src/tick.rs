//! Wall-clock tick timer abstractions

use crate::HostError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of calendar units
///
/// Used both to subscribe (the finest unit of interest) and to report which
/// units changed with a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);

    /// Get the raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Union of two sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if every unit in `other` is present
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if any unit in `other` is present
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if this change set fires a tick for `subscription`
    ///
    /// A change of the subscribed unit or of any coarser unit fires.
    pub const fn triggers(self, subscription: Self) -> bool {
        let finest = subscription.0 & subscription.0.wrapping_neg();
        finest != 0 && self.0 >= finest
    }
}

impl core::ops::BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Broken-down local time delivered with each tick
///
/// Always valid: hour 0-23, minute 0-59, second 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl LocalTime {
    /// Midnight
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a time, or `None` if any field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Create a time from seconds since local midnight (wraps at 24h)
    pub const fn from_seconds_of_day(secs: u32) -> Self {
        let secs = secs % 86_400;
        Self {
            hour: (secs / 3_600) as u8,
            minute: (secs / 60 % 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    /// Hour (0-23)
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0-59)
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second (0-59)
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Units that differ between `previous` and `self`
    ///
    /// A wrap from 23h to 0h also reports a day change.
    pub fn changed_since(&self, previous: &LocalTime) -> TimeUnits {
        let mut units = TimeUnits::NONE;
        if self.second != previous.second {
            units = units | TimeUnits::SECOND;
        }
        if self.minute != previous.minute {
            units = units | TimeUnits::MINUTE;
        }
        if self.hour != previous.hour {
            units = units | TimeUnits::HOUR;
            if self.hour < previous.hour {
                units = units | TimeUnits::DAY;
            }
        }
        units
    }
}

/// Wall-clock tick subscription
///
/// A single subscriber receives [`crate::HostEvent::Tick`] whenever the
/// subscribed unit (or any coarser one) changes.
pub trait TickService {
    /// Subscribe to ticks of the given unit
    fn tick_subscribe(&mut self, unit: TimeUnits) -> Result<(), HostError>;

    /// Cancel the subscription
    fn tick_unsubscribe(&mut self) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_on_coarser_units() {
        assert!(TimeUnits::MINUTE.triggers(TimeUnits::MINUTE));
        assert!(TimeUnits::HOUR.triggers(TimeUnits::MINUTE));
        assert!((TimeUnits::SECOND | TimeUnits::MINUTE).triggers(TimeUnits::MINUTE));
        assert!(!TimeUnits::SECOND.triggers(TimeUnits::MINUTE));
        assert!(!TimeUnits::NONE.triggers(TimeUnits::SECOND));
        assert!(!TimeUnits::HOUR.triggers(TimeUnits::NONE));
    }

    #[test]
    fn test_local_time_validation() {
        assert!(LocalTime::new(23, 59, 59).is_some());
        assert!(LocalTime::new(24, 0, 0).is_none());
        assert!(LocalTime::new(0, 60, 0).is_none());
        assert!(LocalTime::new(0, 0, 60).is_none());
    }

    #[test]
    fn test_from_seconds_of_day() {
        let t = LocalTime::from_seconds_of_day(9 * 3_600 + 5 * 60 + 7);
        assert_eq!((t.hour(), t.minute(), t.second()), (9, 5, 7));

        // Wraps past midnight
        let t = LocalTime::from_seconds_of_day(86_400 + 61);
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 1, 1));
    }

    #[test]
    fn test_changed_since_minute() {
        let a = LocalTime::new(9, 5, 59).unwrap();
        let b = LocalTime::new(9, 6, 0).unwrap();
        let changed = b.changed_since(&a);
        assert!(changed.contains(TimeUnits::MINUTE | TimeUnits::SECOND));
        assert!(!changed.intersects(TimeUnits::HOUR));
    }

    #[test]
    fn test_changed_since_midnight_wrap() {
        let a = LocalTime::new(23, 59, 59).unwrap();
        let b = LocalTime::MIDNIGHT;
        let changed = b.changed_since(&a);
        assert!(changed.contains(TimeUnits::HOUR | TimeUnits::DAY));
    }

    #[test]
    fn test_units_set_ops() {
        let units = TimeUnits::MINUTE | TimeUnits::HOUR;
        assert!(units.contains(TimeUnits::MINUTE));
        assert!(!units.contains(TimeUnits::MINUTE | TimeUnits::SECOND));
        assert!(units.intersects(TimeUnits::MINUTE | TimeUnits::SECOND));
        assert!(TimeUnits::NONE.is_empty());
        assert_eq!(units.bits(), 0b110);
    }
}

//! Property tests for the clock label

use inverter_core::time::{format_time, time_text, TimeText};
use inverter_hal::LocalTime;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_label_is_zero_padded_hh_mm(hour in 0u8..24, minute in 0u8..60, second in 0u8..60) {
        let text = time_text(&LocalTime::new(hour, minute, second).unwrap());
        let (h, m) = text.as_str().split_once(':').unwrap();
        prop_assert_eq!(h.len(), 2);
        prop_assert_eq!(m.len(), 2);
        prop_assert_eq!(h.parse::<u8>().unwrap(), hour);
        prop_assert_eq!(m.parse::<u8>().unwrap(), minute);
    }

    #[test]
    fn prop_formatting_is_idempotent(hour in 0u8..24, minute in 0u8..60) {
        let time = LocalTime::new(hour, minute, 0).unwrap();
        let mut buf = TimeText::new();
        format_time(&time, &mut buf);
        let once = buf.clone();
        format_time(&time, &mut buf);
        prop_assert_eq!(once.as_str(), buf.as_str());
    }

    #[test]
    fn prop_previous_label_is_fully_overwritten(
        first in (0u8..24, 0u8..60),
        second in (0u8..24, 0u8..60),
    ) {
        let mut buf = TimeText::new();
        format_time(&LocalTime::new(first.0, first.1, 0).unwrap(), &mut buf);
        format_time(&LocalTime::new(second.0, second.1, 0).unwrap(), &mut buf);
        let fresh = time_text(&LocalTime::new(second.0, second.1, 0).unwrap());
        prop_assert_eq!(buf.as_str(), fresh.as_str());
    }
}

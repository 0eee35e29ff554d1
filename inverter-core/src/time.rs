//! Clock label formatting

use core::fmt::Write;

use heapless::String;
use inverter_hal::LocalTime;

/// Length of the rendered label ("HH:MM")
pub const TIME_TEXT_LEN: usize = 5;

/// Fixed buffer holding the rendered label
pub type TimeText = String<TIME_TEXT_LEN>;

/// Render `time` as zero-padded 24-hour "HH:MM" into `buf`
///
/// The previous contents are overwritten.
pub fn format_time(time: &LocalTime, buf: &mut TimeText) {
    buf.clear();
    // Cannot overflow: LocalTime keeps both fields below 100
    let _ = write!(buf, "{:02}:{:02}", time.hour(), time.minute());
}

/// Render `time` into a new buffer
pub fn time_text(time: &LocalTime) -> TimeText {
    let mut buf = TimeText::new();
    format_time(time, &mut buf);
    buf
}

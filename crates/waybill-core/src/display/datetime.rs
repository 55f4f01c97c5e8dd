//! Date and time display helpers.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A `Timestamp` rendered in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Wall-clock time between two timestamps, rendered as `1d 4h 05m`.
///
/// Negative spans (clock skew, hand-edited start times) render as `0m`.
pub struct Elapsed<'a> {
    pub from: &'a Timestamp,
    pub to: &'a Timestamp,
}

impl<'a> fmt::Display for Elapsed<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = (self.to.as_second() - self.from.as_second()).max(0);
        let minutes = seconds / 60;
        let (days, hours, minutes) = (minutes / 1440, (minutes / 60) % 24, minutes % 60);

        if days > 0 {
            write!(f, "{days}d {hours}h {minutes:02}m")
        } else if hours > 0 {
            write!(f, "{hours}h {minutes:02}m")
        } else {
            write!(f, "{minutes}m")
        }
    }
}

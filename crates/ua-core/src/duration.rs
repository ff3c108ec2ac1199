//! Focus-time and FILETIME conversions.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// FILETIME ticks (100 ns intervals) per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Seconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// A millisecond count broken down into days, hours, minutes, seconds and milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HumanDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl HumanDuration {
    /// Splits `ms` by 1000, 60, 60 and 24, in that order.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        let milliseconds = ms % 1000;
        let total_seconds = ms / 1000;
        let seconds = total_seconds % 60;
        let total_minutes = total_seconds / 60;
        let minutes = total_minutes % 60;
        let total_hours = total_minutes / 60;
        Self {
            days: total_hours / 24,
            hours: total_hours % 24,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Recombines the breakdown into a millisecond count.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        ((((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds) * 1000)
            + self.milliseconds
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d, {}h, {}m, {}s, {}ms",
            self.days, self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

/// Breaks a millisecond count into calendar units.
///
/// Returns `None` for negative input, which a stored focus time should never hold.
pub fn to_human_duration(ms: i64) -> Option<HumanDuration> {
    u64::try_from(ms).ok().map(HumanDuration::from_millis)
}

/// Converts a Windows FILETIME into a UTC timestamp.
///
/// Sub-second ticks are kept at 100 ns resolution.
pub fn filetime_to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    let secs = ticks.div_euclid(TICKS_PER_SECOND) - FILETIME_UNIX_OFFSET_SECS;
    let nanos = u32::try_from(ticks.rem_euclid(TICKS_PER_SECOND) * 100).ok()?;
    DateTime::from_timestamp(secs, nanos)
}

/// Formats a Windows FILETIME as an ISO 8601 UTC timestamp with a trailing `Z`.
///
/// Fractional seconds are only printed when present. Falls back to the raw
/// tick count if the instant is outside the representable calendar range.
pub fn filetime_to_iso8601(ticks: i64) -> String {
    filetime_to_datetime(ticks).map_or_else(
        || ticks.to_string(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )
}

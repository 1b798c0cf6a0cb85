//! Wall-clock strings for a location, given its UTC offset in seconds.
//!
//! The instant is shifted by the offset and then read as if it were UTC.
//! This is not a timezone conversion; it only yields the `HH:MM` a clock at
//! that offset would show.

use chrono::{DateTime, Utc};

const CLOCK_FORMAT: &str = "%H:%M";

/// `HH:MM` of `epoch_secs + offset_secs` read as UTC.
///
/// Returns `None` if the shifted instant cannot be represented.
pub fn shifted_clock(epoch_secs: i64, offset_secs: i64) -> Option<String> {
    let shifted = epoch_secs.checked_add(offset_secs)?;
    DateTime::<Utc>::from_timestamp(shifted, 0).map(|dt| dt.format(CLOCK_FORMAT).to_string())
}

/// Current clock reading at a location, relative to the caller's `now`.
pub fn local_clock(now: DateTime<Utc>, offset_secs: i64) -> Option<String> {
    shifted_clock(now.timestamp(), offset_secs)
}

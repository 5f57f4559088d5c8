//! Time-of-day parsing for span bounds.
//!
//! Span math assumes all events of a span fall on the same day. Only the
//! `HH:MM:SS.mmm` part of a timestamp is read; dates and zones are ignored.

use std::sync::LazyLock;
use regex::Regex;

static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})[.,](\d{3})").expect("static regex")
});

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;

/// The first `HH:MM:SS.mmm` fragment in a timestamp, with a `,` fraction
/// separator rewritten to `.` to match normalized record timestamps.
pub fn clock_fragment(timestamp: &str) -> Option<String> {
    CLOCK.find(timestamp).map(|m| m.as_str().replace(',', "."))
}

/// Milliseconds since midnight, or `None` if the timestamp has no
/// `HH:MM:SS.mmm` (or `HH:MM:SS,mmm`) fragment or the fragment is out of range.
pub fn clock_millis(timestamp: &str) -> Option<u64> {
    let caps = CLOCK.captures(timestamp)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    let millis: u64 = caps[4].parse().ok()?;

    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    Some(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * 1000 + millis)
}

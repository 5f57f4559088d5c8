//! Timestamp extraction across the encodings seen in mixed-service streams.
//!
//! Forms are tried in a fixed order and the first one that yields a valid
//! value wins; a line matching several forms is not reconciled.
//!
//! | form                              | normalized as                   |
//! |-----------------------------------|---------------------------------|
//! | `2024-02-07 14:23:00,891`         | `2024-02-07T14:23:00.891`       |
//! | `Feb  7 14:23:00`                 | `Feb 07 14:23:00`               |
//! | `1707315780` / `1707315780891`    | `2024-02-07T14:23:00.891Z`      |

use std::sync::LazyLock;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};
use regex::Regex;

static ISO_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})[T ](\d{2}:\d{2}:\d{2})[.,](\d+)").expect("static regex")
});

static SYSLOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{1,2})\s+(\d{2}):(\d{2}):(\d{2})\b")
        .expect("static regex")
});

static EPOCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{13}|\d{10})\b").expect("static regex")
});

/// Extract and normalize the first recognised timestamp in a line.
pub fn extract_timestamp(line: &str) -> Option<String> {
    iso_like(line)
        .or_else(|| syslog(line))
        .or_else(|| epoch(line))
}

fn iso_like(line: &str) -> Option<String> {
    ISO_LIKE.captures_iter(line).find_map(|caps| {
        let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&caps[2], "%H:%M:%S").ok()?;
        let millis = fraction_to_millis(&caps[3]);
        let time = time.with_nanosecond(millis * 1_000_000)?;
        let dt = NaiveDateTime::new(date, time);
        Some(dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
    })
}

/// "5" -> 500, "891" -> 891, "891234" -> 891
fn fraction_to_millis(fraction: &str) -> u32 {
    let digits: String = fraction.chars().chain("000".chars()).take(3).collect();
    digits.parse().unwrap_or(0)
}

fn syslog(line: &str) -> Option<String> {
    SYSLOG.captures_iter(line).find_map(|caps| {
        let day: u32 = caps[2].parse().ok()?;
        let hour: u32 = caps[3].parse().ok()?;
        let minute: u32 = caps[4].parse().ok()?;
        let second: u32 = caps[5].parse().ok()?;

        if !(1..=31).contains(&day) || hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(format!("{} {:02} {:02}:{:02}:{:02}", &caps[1], day, hour, minute, second))
    })
}

fn epoch(line: &str) -> Option<String> {
    EPOCH.captures_iter(line).find_map(|caps| {
        let digits = &caps[1];
        let value: i64 = digits.parse().ok()?;
        let instant: DateTime<Utc> = if digits.len() == 13 {
            DateTime::from_timestamp_millis(value)?
        } else {
            DateTime::from_timestamp(value, 0)?
        };
        Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    })
}

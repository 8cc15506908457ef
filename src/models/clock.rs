//! Clock-time parsing and formatting.
//!
//! Inside the engine every time of day is an `f64` number of minutes since
//! midnight. At the serialization boundary times travel as `"HH:MM"` strings.

use chrono::{NaiveTime, Timelike};

use crate::error::ValidationError;

/// Parses a clock time into minutes since midnight.
///
/// Accepts `"HH:MM"`, `"HH:MM:SS"`, and bare hours such as `"9"` or `"14"`.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::parse_clock;
///
/// assert_eq!(parse_clock("08:30").unwrap(), 510.0);
/// assert_eq!(parse_clock("9").unwrap(), 540.0);
/// assert!(parse_clock("noon").is_err());
/// ```
pub fn parse_clock(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
        .or_else(|| {
            trimmed
                .parse::<u32>()
                .ok()
                .and_then(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        })
        .map(minutes_of)
        .ok_or_else(|| ValidationError::InvalidClockTime(text.to_string()))
}

/// Minutes since midnight for a [`NaiveTime`].
pub fn minutes_of(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 60.0
}

/// Formats minutes since midnight as `"HH:MM"`, rounded to the nearest minute.
///
/// Times past midnight keep counting hours (`"25:10"`) so that a late return
/// is never mistaken for an early one.
pub fn format_clock(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Serde adapter for `f64` minute fields carried as `"HH:MM"` strings.
pub(crate) mod hhmm {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(minutes: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_clock(&text).map_err(de::Error::custom)
    }
}

//! # Event Naming
//!
//! Default names for new events: the day plus a coarse part of the day,
//! e.g. `"16 Aug evening"`.
//!
//! ```text
//!  hour   00─04   05──11   12─13   14──17     18──21    22─23
//!         night  morning   noon  afternoon  evening   night
//! ```

use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::Display;

/// Returns the part of the day for an hour (0-23).
pub fn day_bucket(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=13 => "noon",
        14..=17 => "afternoon",
        18..=21 => "evening",
        _ => "night",
    }
}

/// Builds a default event name from a local timestamp.
///
/// ## Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use qrwari_core::naming::generate_event_name;
///
/// let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
/// let now = bangkok.with_ymd_and_hms(2025, 8, 16, 19, 30, 0).unwrap();
/// assert_eq!(generate_event_name(&now), "16 Aug evening");
/// ```
pub fn generate_event_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{} {}", now.format("%-d %b"), day_bucket(now.hour()))
}

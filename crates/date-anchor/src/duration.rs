//! End-instant computation.

use chrono::{DateTime, Duration, Utc};

/// Add a duration in minutes to a start instant.
///
/// This is absolute-time addition, not wall-clock arithmetic: a 60-minute
/// meeting is 3600 real seconds long even when it straddles a DST
/// transition and the wall-clock difference reads 59 or 61 minutes.
pub fn end_instant(start: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(minutes))
}

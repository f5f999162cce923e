//! Relative date resolution.
//!
//! Turns a caller-supplied (week offset, weekday, time-of-day, timezone)
//! tuple into a UTC instant. The caller is expected to be a tool-invocation
//! layer fronting a language model: the model supplies only relative fields,
//! and every absolute timestamp is computed here. If an input cannot be
//! resolved exactly, we return an error rather than guessing.
//!
//! # Week selection
//!
//! `week_offset` alone decides which Monday-to-Sunday week the result lands
//! in; the weekday field only picks a day inside that week. With
//! `week_offset = 0` and a weekday earlier than the reference's weekday, the
//! result is therefore earlier in the reference's own week, not the next
//! occurrence of that weekday. Callers that want "next occurrence" semantics
//! pass `week_offset = 1` once the day has passed. This matches the
//! behavior of the systems this engine replaces; whether "this Friday" said
//! on a Saturday should roll forward instead is a product decision, not an
//! engine default to change quietly.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::duration::end_instant;
use crate::error::{DateError, Result};
use crate::wall_clock::WallClock;
use crate::weekday::Weekday;

/// A relative event time as supplied by the tool-calling layer.
///
/// `time` is a 24-hour `HH:mm` string; `duration_minutes` and `timezone`
/// fall back to [`EngineConfig`] defaults when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelativeDateInput {
    /// Whole weeks from the reference week (any sign).
    pub week_offset: i32,
    /// Day inside the selected week.
    pub weekday: Weekday,
    /// Time-of-day, 24-hour `HH:mm`.
    pub time: String,
    /// Event length in minutes; must be positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// IANA timezone override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A fully resolved event time: start, end, and the zone it was resolved in.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub timezone: Tz,
}

/// Strict 24-hour `HH:mm` parse.
fn parse_hhmm(time: &str) -> Result<(u32, u32)> {
    let bytes = time.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !shape_ok {
        return Err(DateError::InvalidTimeFormat(time.to_string()));
    }
    let hour: u32 = time[0..2]
        .parse()
        .map_err(|_| DateError::InvalidTimeFormat(time.to_string()))?;
    let minute: u32 = time[3..5]
        .parse()
        .map_err(|_| DateError::InvalidTimeFormat(time.to_string()))?;
    if hour > 23 || minute > 59 {
        return Err(DateError::InvalidTimeFormat(time.to_string()));
    }
    Ok((hour, minute))
}

/// Resolve `input` against an explicit reference clock reading.
///
/// The target wall-clock keeps the reference's timezone; only the caller's
/// choice of reference decides which zone the arithmetic happens in.
///
/// # Errors
///
/// [`DateError::InvalidTimeFormat`] for a malformed `time`,
/// [`DateError::NonexistentLocalTime`] if the target reading falls in a DST
/// gap, and [`DateError::DateCalculationInconsistency`] if the computed date
/// does not land on the requested weekday. The last one indicates an engine
/// bug, not bad input, and deployments should log it loudly.
pub fn resolve_from(reference: &WallClock, input: &RelativeDateInput) -> Result<DateTime<Utc>> {
    let (hour, minute) = parse_hhmm(&input.time)?;
    let target_iso = input.weekday.iso_number();

    let current_iso = reference.iso_weekday();
    let days_to_target_in_week = i64::from(target_iso) - i64::from(current_iso);
    let total_days_offset = i64::from(input.week_offset) * 7 + days_to_target_in_week;

    let target = reference
        .add_days(total_days_offset)
        .with_time(hour, minute)?;

    // Weekday round-trip check: calendar arithmetic bugs must never escape
    // as a silently wrong day.
    let landed_iso = target.iso_weekday();
    if landed_iso != target_iso {
        return Err(DateError::DateCalculationInconsistency {
            expected: target_iso,
            actual: landed_iso,
            date: target.to_string(),
        });
    }

    target.to_utc()
}

/// Resolve `input` against "now" in its own (or the configured) zone, and
/// apply the duration to produce the end instant.
///
/// # Errors
///
/// Everything [`resolve_from`] raises, plus [`DateError::InvalidTimezone`]
/// for an unknown zone and [`DateError::InvalidDuration`] for a
/// zero-minute duration.
pub fn resolve(input: &RelativeDateInput, config: &EngineConfig) -> Result<Resolution> {
    let zone = input
        .timezone
        .as_deref()
        .unwrap_or(&config.default_timezone);
    let minutes = input
        .duration_minutes
        .unwrap_or(config.default_duration_minutes);
    if minutes == 0 {
        return Err(DateError::InvalidDuration(
            "durationMinutes must be positive".to_string(),
        ));
    }

    let reference = WallClock::now(zone)?;
    let start = resolve_from(&reference, input)?;
    Ok(Resolution {
        start,
        end: end_instant(start, minutes),
        timezone: reference.zone(),
    })
}

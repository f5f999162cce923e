//! Human-readable rendering of instants and event listings.
//!
//! Every formatter projects the instant into a caller-named zone before
//! rendering. Nothing here ever consults the process's ambient timezone,
//! and the locale is a parameter, not a constant.

use chrono::{DateTime, Locale, Timelike, Utc};

use crate::error::Result;
use crate::ics::CalendarEvent;
use crate::wall_clock::parse_zone;

/// Rendering options for [`format_instant`].
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Include the weekday name.
    pub include_weekday: bool,
    /// Force the time-of-day even for midnight values. Midnight instants
    /// otherwise render date-only, which is how all-day boundaries read.
    pub include_time: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_weekday: true,
            include_time: false,
        }
    }
}

/// Render an instant in the given zone and locale.
///
/// # Errors
///
/// Returns [`crate::DateError::InvalidTimezone`] for an unknown zone.
pub fn format_instant(
    instant: DateTime<Utc>,
    zone: &str,
    locale: Locale,
    options: &FormatOptions,
) -> Result<String> {
    let tz = parse_zone(zone)?;
    let local = instant.with_timezone(&tz);

    let midnight = local.hour() == 0 && local.minute() == 0;
    let with_time = options.include_time || !midnight;

    let pattern = match (options.include_weekday, with_time) {
        (true, true) => "%A %-d %B %Y %H:%M",
        (true, false) => "%A %-d %B %Y",
        (false, true) => "%-d %B %Y %H:%M",
        (false, false) => "%-d %B %Y",
    };
    Ok(local.format_localized(pattern, locale).to_string())
}

/// Render one event as a listing line.
///
/// Shape: `- <title>: <start> to <end>[ at <location>]`. The end half is
/// omitted when start and end render identically; events with no start at
/// all are marked unscheduled rather than dropped from a listing.
pub fn format_event_line(
    event: &CalendarEvent,
    zone: &str,
    locale: Locale,
) -> Result<String> {
    let options = FormatOptions::default();
    let mut line = format!("- {}", event.title);

    match event.start {
        Some(start) => {
            let start_text = format_instant(start, zone, locale, &options)?;
            line.push_str(": ");
            line.push_str(&start_text);
            if let Some(end) = event.end {
                let end_text = format_instant(end, zone, locale, &options)?;
                if end_text != start_text {
                    line.push_str(" to ");
                    line.push_str(&end_text);
                }
            }
        }
        None => line.push_str(": (unscheduled)"),
    }

    if let Some(location) = &event.location {
        line.push_str(" at ");
        line.push_str(location);
    }
    Ok(line)
}

/// Render a listing, one line per event.
pub fn format_event_list(
    events: &[CalendarEvent],
    zone: &str,
    locale: Locale,
) -> Result<String> {
    let mut lines = Vec::with_capacity(events.len());
    for event in events {
        lines.push(format_event_line(event, zone, locale)?);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn event(title: &str, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> CalendarEvent {
        CalendarEvent {
            title: title.to_string(),
            start,
            end,
            location: None,
            description: None,
        }
    }

    #[test]
    fn test_renders_in_target_zone() {
        // 08:00 UTC is 10:00 in Helsinki in January.
        let text = format_instant(
            instant(2025, 1, 13, 8, 0),
            "Europe/Helsinki",
            Locale::en_US,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "Monday 13 January 2025 10:00");
    }

    #[test]
    fn test_zone_changes_the_rendered_day() {
        // 23:30 UTC on the 13th is already the 14th in Tokyo.
        let text = format_instant(
            instant(2025, 1, 13, 23, 30),
            "Asia/Tokyo",
            Locale::en_US,
            &FormatOptions::default(),
        )
        .unwrap();
        assert!(text.contains("14 January"), "got: {text}");
    }

    #[test]
    fn test_midnight_renders_date_only() {
        // 22:00 UTC is midnight in Helsinki (winter, UTC+2).
        let text = format_instant(
            instant(2025, 1, 12, 22, 0),
            "Europe/Helsinki",
            Locale::en_US,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "Monday 13 January 2025");
    }

    #[test]
    fn test_include_time_forces_midnight_time() {
        let options = FormatOptions {
            include_weekday: true,
            include_time: true,
        };
        let text = format_instant(
            instant(2025, 1, 12, 22, 0),
            "Europe/Helsinki",
            Locale::en_US,
            &options,
        )
        .unwrap();
        assert_eq!(text, "Monday 13 January 2025 00:00");
    }

    #[test]
    fn test_weekday_can_be_dropped() {
        let options = FormatOptions {
            include_weekday: false,
            include_time: false,
        };
        let text = format_instant(
            instant(2025, 1, 13, 8, 0),
            "Europe/Helsinki",
            Locale::en_US,
            &options,
        )
        .unwrap();
        assert_eq!(text, "13 January 2025 10:00");
    }

    #[test]
    fn test_localized_weekday_name() {
        let text = format_instant(
            instant(2025, 1, 13, 8, 0),
            "Europe/Helsinki",
            Locale::fi_FI,
            &FormatOptions::default(),
        )
        .unwrap();
        assert!(text.contains("maanantai"), "got: {text}");
    }

    #[test]
    fn test_unknown_zone_is_an_error() {
        let result = format_instant(
            instant(2025, 1, 13, 8, 0),
            "Atlantis/Sunken_City",
            Locale::en_US,
            &FormatOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_event_line_with_range_and_location() {
        let mut e = event(
            "Standup",
            Some(instant(2025, 1, 13, 7, 0)),
            Some(instant(2025, 1, 13, 8, 0)),
        );
        e.location = Some("Room 4".to_string());
        let line = format_event_line(&e, "Europe/Helsinki", Locale::en_US).unwrap();
        assert_eq!(
            line,
            "- Standup: Monday 13 January 2025 09:00 to Monday 13 January 2025 10:00 at Room 4"
        );
    }

    #[test]
    fn test_event_line_collapses_identical_range() {
        let e = event(
            "Reminder",
            Some(instant(2025, 1, 13, 7, 0)),
            Some(instant(2025, 1, 13, 7, 0)),
        );
        let line = format_event_line(&e, "Europe/Helsinki", Locale::en_US).unwrap();
        assert_eq!(line, "- Reminder: Monday 13 January 2025 09:00");
    }

    #[test]
    fn test_event_line_without_start() {
        let e = event("Someday", None, None);
        let line = format_event_line(&e, "Europe/Helsinki", Locale::en_US).unwrap();
        assert_eq!(line, "- Someday: (unscheduled)");
    }

    #[test]
    fn test_event_list_joins_lines() {
        let events = vec![
            event("One", Some(instant(2025, 1, 13, 7, 0)), None),
            event("Two", Some(instant(2025, 1, 14, 7, 0)), None),
        ];
        let listing = format_event_list(&events, "Europe/Helsinki", Locale::en_US).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- One:"));
        assert!(lines[1].starts_with("- Two:"));
    }
}

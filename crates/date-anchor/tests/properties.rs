//! Property tests for the engine's algebraic guarantees.

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use date_anchor::{
    decode_datetime, encode_event, end_instant, escape_text, resolve_from, unescape_text,
    EngineConfig, EventDraft, NullSink, RelativeDateInput, WallClock, Weekday,
};

const ZONES: [&str; 5] = [
    "UTC",
    "Europe/Helsinki",
    "America/New_York",
    "Asia/Tokyo",
    "Australia/Sydney",
];

fn zone_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ZONES.to_vec())
}

proptest! {
    /// Adding whole weeks never changes the weekday.
    #[test]
    fn adding_whole_weeks_preserves_weekday(
        zone in zone_strategy(),
        year in 1990i32..2045,
        month in 1u32..=12,
        day in 1u32..=28,
        weeks in -200i64..200,
    ) {
        let w = WallClock::from_ymd_hms(zone, year, month, day, 12, 0, 0).unwrap();
        prop_assert_eq!(w.add_days(weeks * 7).iso_weekday(), w.iso_weekday());
    }

    /// The resolved instant, projected back into the resolution zone,
    /// lands on the requested weekday at the requested wall-clock time.
    #[test]
    fn resolution_lands_on_requested_weekday(
        zone in zone_strategy(),
        year in 1995i32..2040,
        month in 1u32..=12,
        day in 1u32..=28,
        week_offset in -60i32..60,
        weekday_iso in 1u8..=7,
        hour in 5u32..22,
        minute in 0u32..60,
    ) {
        let reference = WallClock::from_ymd_hms(zone, year, month, day, 12, 0, 0).unwrap();
        let input = RelativeDateInput {
            week_offset,
            weekday: Weekday::from_iso(weekday_iso).unwrap(),
            time: format!("{hour:02}:{minute:02}"),
            duration_minutes: None,
            timezone: None,
        };
        let instant = resolve_from(&reference, &input).unwrap();
        let local = WallClock::from_instant(instant, zone).unwrap();
        prop_assert_eq!(local.iso_weekday(), weekday_iso);
        prop_assert_eq!((local.hour(), local.minute()), (hour, minute));
    }

    /// An encoded DTSTART decodes back to the same instant, to the second.
    #[test]
    fn encoded_dtstart_decodes_to_the_same_instant(ts in 0i64..4_102_444_800i64) {
        let start = DateTime::<Utc>::from_timestamp(ts, 0).unwrap();
        let draft = EventDraft {
            title: "t".to_string(),
            start,
            end: start,
            description: None,
            location: None,
            uid: None,
        };
        let text = encode_event(&draft, &EngineConfig::default());
        let token = text
            .split("\r\n")
            .find_map(|line| line.strip_prefix("DTSTART:"))
            .unwrap();
        let decoded = decode_datetime(token, "UTC".parse().unwrap(), &NullSink).unwrap();
        prop_assert_eq!(decoded, start);
    }

    /// End-instant arithmetic is exact in absolute seconds.
    #[test]
    fn duration_is_absolute_seconds(ts in 0i64..4_000_000_000i64, minutes in 0u32..100_000) {
        let start = DateTime::<Utc>::from_timestamp(ts, 0).unwrap();
        prop_assert_eq!(end_instant(start, 0), start);
        prop_assert_eq!(
            (end_instant(start, minutes) - start).num_seconds(),
            i64::from(minutes) * 60
        );
    }

    /// TEXT escaping round-trips arbitrary non-control content.
    #[test]
    fn text_escaping_round_trips(s in "\\PC*") {
        prop_assert_eq!(unescape_text(&escape_text(&s)), s);
    }
}

/// Resolving across a DST transition keeps the requested wall-clock time;
/// the UTC offset moves instead.
#[test]
fn wall_clock_time_survives_dst_transitions() {
    let cases = [
        ("Europe/Helsinki", 2025, 3, 27),   // springs forward 2025-03-30
        ("Europe/Helsinki", 2025, 10, 23),  // falls back 2025-10-26
        ("America/New_York", 2025, 3, 6),   // springs forward 2025-03-09
        ("America/New_York", 2025, 10, 30), // falls back 2025-11-02
    ];
    for (zone, year, month, day) in cases {
        let reference = WallClock::from_ymd_hms(zone, year, month, day, 9, 0, 0).unwrap();
        let input = RelativeDateInput {
            week_offset: 1,
            weekday: Weekday::Wednesday,
            time: "15:00".to_string(),
            duration_minutes: None,
            timezone: None,
        };
        let instant = resolve_from(&reference, &input).unwrap();
        let local = WallClock::from_instant(instant, zone).unwrap();
        assert_eq!((local.hour(), local.minute()), (15, 0), "{zone}");
    }
}

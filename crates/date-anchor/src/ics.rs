//! iCalendar (RFC 5545) date-time codec and VEVENT handling.
//!
//! Decoding is deliberately lenient: calendar data arrives from third-party
//! servers and a single malformed token must not abort a whole listing, so
//! every decode failure is a warning plus `None`, never an error. Encoding
//! is strict: stored `DTSTAMP`/`DTSTART`/`DTEND` are always emitted in the
//! UTC form, lines end in CRLF, and TEXT values follow the RFC 5545
//! escaping rules.
//!
//! A date-time token takes one of three wire forms:
//!
//! - `YYYYMMDDTHHMMSSZ`, an instant in UTC;
//! - `TZID=<zone>:YYYYMMDDTHHMMSS` or a trailing `+HHMM`/`-HHMM` offset,
//!   a wall-clock reading qualified with a zone or fixed offset;
//! - `YYYYMMDDTHHMMSS` with no marker, a "floating" reading interpreted in
//!   a caller-supplied fallback zone.
//!
//! A bare `YYYYMMDD` is accepted as midnight under the same zone rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::wall_clock::WallClock;

/// Where decode warnings go.
///
/// Injected so callers can redirect warnings without this crate dictating
/// a logging setup. [`TracingSink`] is the usual choice; [`NullSink`]
/// discards.
pub trait WarnSink {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl WarnSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "date_anchor::ics", "{message}");
    }
}

/// Discards warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WarnSink for NullSink {
    fn warn(&self, _message: &str) {}
}

/// An event decoded from iCalendar text.
///
/// Only decoding produces these (tests aside); start and end are UTC
/// instants or absent when their tokens failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Input for [`encode_event`].
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Defaults to a fresh `<uuid>@<uid_domain>` when absent.
    pub uid: Option<String>,
}

// ── decoding ────────────────────────────────────────────────────────────

/// Decode one iCalendar date-time token to a UTC instant.
///
/// Classifies the wire form (UTC-suffixed, TZID-prefixed, fixed-offset,
/// floating) and applies the matching zone rule; `fallback` covers floating
/// tokens and unknown TZIDs. Malformed tokens yield `None` after a warning.
pub fn decode_datetime(
    token: &str,
    fallback: Tz,
    warn: &dyn WarnSink,
) -> Option<DateTime<Utc>> {
    let token = token.trim();
    if token.is_empty() {
        warn.warn("empty iCalendar date-time token");
        return None;
    }

    if let Some(rest) = token.strip_prefix("TZID=") {
        let Some((zone_id, value)) = rest.split_once(':') else {
            warn.warn(&format!("malformed TZID-qualified token '{token}'"));
            return None;
        };
        let tz = match zone_id.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn.warn(&format!(
                    "unknown TZID '{zone_id}', falling back to {fallback}"
                ));
                fallback
            }
        };
        return decode_in_zone(value, tz, warn);
    }

    if let Some(stripped) = token.strip_suffix('Z') {
        return match parse_basic(stripped) {
            Some(naive) => Some(naive.and_utc()),
            None => {
                warn.warn(&format!("malformed UTC date-time token '{token}'"));
                None
            }
        };
    }

    if has_trailing_offset(token) {
        return match DateTime::parse_from_str(token, "%Y%m%dT%H%M%S%z") {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                warn.warn(&format!("malformed offset date-time token '{token}'"));
                None
            }
        };
    }

    decode_in_zone(token, fallback, warn)
}

/// Parse a basic-format value and resolve it as a wall-clock reading in `tz`.
fn decode_in_zone(value: &str, tz: Tz, warn: &dyn WarnSink) -> Option<DateTime<Utc>> {
    let Some(naive) = parse_basic(value) else {
        warn.warn(&format!("malformed iCalendar date-time '{value}'"));
        return None;
    };
    match WallClock::from_naive_in(naive, tz).to_utc() {
        Ok(instant) => Some(instant),
        Err(err) => {
            warn.warn(&err.to_string());
            None
        }
    }
}

/// `YYYYMMDDTHHMMSS` or bare `YYYYMMDD` (midnight).
fn parse_basic(value: &str) -> Option<NaiveDateTime> {
    match value.len() {
        15 => NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok(),
        8 => NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        _ => None,
    }
}

/// `YYYYMMDDTHHMMSS` followed by `+HHMM` or `-HHMM`.
fn has_trailing_offset(token: &str) -> bool {
    if !token.is_ascii() || token.len() != 20 {
        return false;
    }
    let tail = &token[15..];
    (tail.starts_with('+') || tail.starts_with('-'))
        && tail[1..].chars().all(|c| c.is_ascii_digit())
}

// ── event parsing ───────────────────────────────────────────────────────

/// Parse every `VEVENT` out of an iCalendar document.
///
/// Handles folded lines, `TZID` property parameters, and TEXT unescaping.
/// Events whose date tokens fail to decode still appear in the result with
/// the affected field absent; the listing as a whole never fails.
pub fn parse_events(text: &str, fallback: Tz, warn: &dyn WarnSink) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut current: Option<CalendarEvent> = None;

    for line in unfold(text) {
        let Some((name, params, value)) = split_content_line(&line) else {
            continue;
        };
        match name.as_str() {
            "BEGIN" if value.eq_ignore_ascii_case("VEVENT") => {
                current = Some(CalendarEvent {
                    title: String::new(),
                    start: None,
                    end: None,
                    location: None,
                    description: None,
                });
            }
            "END" if value.eq_ignore_ascii_case("VEVENT") => {
                if let Some(event) = current.take() {
                    events.push(event);
                }
            }
            _ => {
                let Some(event) = current.as_mut() else {
                    continue;
                };
                match name.as_str() {
                    "SUMMARY" => event.title = unescape_text(value),
                    "DTSTART" => event.start = decode_property(&params, value, fallback, warn),
                    "DTEND" => event.end = decode_property(&params, value, fallback, warn),
                    "LOCATION" => event.location = Some(unescape_text(value)),
                    "DESCRIPTION" => event.description = Some(unescape_text(value)),
                    _ => {}
                }
            }
        }
    }
    events
}

/// Whether an event overlaps the half-open window `[start, end)`.
///
/// Zero-length and end-less events count as instants; events with no start
/// never match.
pub fn in_range(
    event: &CalendarEvent,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> bool {
    match event.start {
        Some(start) => match event.end {
            Some(end) if end > start => start < window_end && end > window_start,
            _ => window_start <= start && start < window_end,
        },
        None => false,
    }
}

/// Undo RFC 5545 line folding; tolerates bare-LF input from sloppy servers.
fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.starts_with(' ') || raw.starts_with('\t') {
            if let Some(last) = lines.last_mut() {
                last.push_str(&raw[1..]);
                continue;
            }
        }
        if !raw.is_empty() {
            lines.push(raw.to_string());
        }
    }
    lines
}

/// Split `NAME;PARAM=V;PARAM=V:value` into its parts.
fn split_content_line(line: &str) -> Option<(String, Vec<(String, String)>, &str)> {
    let (head, value) = line.split_once(':')?;
    let mut pieces = head.split(';');
    let name = pieces.next()?.trim().to_ascii_uppercase();
    let params = pieces
        .filter_map(|p| p.split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_uppercase(), v.trim().to_string()))
        .collect();
    Some((name, params, value))
}

/// Decode a DTSTART/DTEND value, folding a TZID parameter back into the
/// token grammar [`decode_datetime`] understands.
fn decode_property(
    params: &[(String, String)],
    value: &str,
    fallback: Tz,
    warn: &dyn WarnSink,
) -> Option<DateTime<Utc>> {
    match params.iter().find(|(k, _)| k == "TZID") {
        Some((_, tzid)) => decode_datetime(&format!("TZID={tzid}:{value}"), fallback, warn),
        None => decode_datetime(value, fallback, warn),
    }
}

// ── encoding ────────────────────────────────────────────────────────────

/// Escape a TEXT value: backslash, comma, and semicolon get a backslash,
/// newlines become the literal two-character `\n`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`escape_text`]. Unknown escapes are kept verbatim.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(c @ ('\\' | ',' | ';')) => out.push(c),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// The UTC wire form, `YYYYMMDDTHHMMSSZ`.
fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Serialize one event as a `VCALENDAR` block.
///
/// All date-times are emitted in the UTC form and every line ends in CRLF;
/// some CalDAV servers reject bare LF, so the terminator is not optional.
pub fn encode_event(draft: &EventDraft, config: &EngineConfig) -> String {
    let uid = draft
        .uid
        .clone()
        .unwrap_or_else(|| format!("{}@{}", Uuid::new_v4(), config.uid_domain));

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//date-anchor//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{}", format_utc(Utc::now())),
        format!("DTSTART:{}", format_utc(draft.start)),
        format!("DTEND:{}", format_utc(draft.end)),
        format!("SUMMARY:{}", escape_text(&draft.title)),
    ];
    if let Some(description) = &draft.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(location) = &draft.location {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

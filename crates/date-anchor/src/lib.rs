//! # date-anchor
//!
//! Deterministic relative-date resolution for calendar agents.
//!
//! A conversational agent schedules events from relative expressions
//! ("next Monday at 3pm") that a language model reduces to a small
//! structured input. This crate turns that input into correct, DST-safe
//! UTC instants: the model never guesses an absolute timestamp, and every
//! computation runs through an explicit, caller-named IANA timezone.
//!
//! The engine is synchronous and stateless apart from reading the system
//! clock. It performs no I/O, never suspends, and is safe to call
//! concurrently; timeouts and retries belong to the network layers around
//! it.
//!
//! ## Modules
//!
//! - [`weekday`]: canonical weekday set with its ISO-8601 numbering
//! - [`wall_clock`]: zone-explicit clock readings and UTC conversion
//! - [`resolve`]: (week offset, weekday, time) to UTC instant
//! - [`duration`]: end-instant computation in absolute time
//! - [`display`]: zone- and locale-aware rendering
//! - [`ics`]: iCalendar date-time codec and VEVENT handling
//! - [`config`]: engine defaults (timezone, duration, UID domain, locale)
//! - [`error`]: error types

pub mod config;
pub mod display;
pub mod duration;
pub mod error;
pub mod ics;
pub mod resolve;
pub mod wall_clock;
pub mod weekday;

pub use config::EngineConfig;
pub use display::{format_event_line, format_event_list, format_instant, FormatOptions};
pub use duration::end_instant;
pub use error::{DateError, Result};
pub use ics::{
    decode_datetime, encode_event, escape_text, in_range, parse_events, unescape_text,
    CalendarEvent, EventDraft, NullSink, TracingSink, WarnSink,
};
pub use resolve::{resolve, resolve_from, RelativeDateInput, Resolution};
pub use wall_clock::WallClock;
pub use weekday::Weekday;

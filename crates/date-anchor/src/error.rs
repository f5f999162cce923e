//! Error types for date-anchor operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateError {
    #[error("Invalid timezone: '{0}' is not a recognized IANA identifier")]
    InvalidTimezone(String),

    #[error("Invalid weekday: '{0}'")]
    InvalidWeekday(String),

    #[error("Invalid time format: '{0}' (expected 24-hour HH:mm)")]
    InvalidTimeFormat(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid locale: '{0}'")]
    InvalidLocale(String),

    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(String),

    #[error("Date calculation inconsistency: expected ISO weekday {expected}, got {actual} on {date}")]
    DateCalculationInconsistency {
        expected: u8,
        actual: u8,
        date: String,
    },
}

pub type Result<T> = std::result::Result<T, DateError>;

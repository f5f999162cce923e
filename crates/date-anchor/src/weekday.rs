//! Canonical weekday enumeration with its ISO-8601 numbering.
//!
//! ISO-8601 numbers the week Monday=1 through Sunday=7. Both directions of
//! the mapping are total over the canonical set; anything else is rejected
//! with [`DateError::InvalidWeekday`] so a malformed caller string can never
//! silently turn into a default day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DateError, Result};

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The ISO-8601 number for this weekday (Monday=1 .. Sunday=7).
    pub fn iso_number(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// Look up a weekday by its ISO-8601 number.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidWeekday`] for numbers outside 1..=7.
    pub fn from_iso(n: u8) -> Result<Weekday> {
        match n {
            1 => Ok(Weekday::Monday),
            2 => Ok(Weekday::Tuesday),
            3 => Ok(Weekday::Wednesday),
            4 => Ok(Weekday::Thursday),
            5 => Ok(Weekday::Friday),
            6 => Ok(Weekday::Saturday),
            7 => Ok(Weekday::Sunday),
            _ => Err(DateError::InvalidWeekday(n.to_string())),
        }
    }

    /// The canonical lowercase name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = DateError;

    /// Parse a weekday name (case-insensitive, full and common abbreviated forms).
    fn from_str(s: &str) -> Result<Weekday> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "tues" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "thurs" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => Err(DateError::InvalidWeekday(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_mapping_is_a_bijection() {
        for day in Weekday::ALL {
            let n = day.iso_number();
            assert!((1..=7).contains(&n));
            assert_eq!(Weekday::from_iso(n).unwrap(), day);
        }
    }

    #[test]
    fn test_from_iso_rejects_out_of_range() {
        assert!(Weekday::from_iso(0).is_err());
        assert!(Weekday::from_iso(8).is_err());
        assert!(Weekday::from_iso(255).is_err());
    }

    #[test]
    fn test_parse_full_names() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert_eq!(" friday ".parse::<Weekday>().unwrap(), Weekday::Friday);
    }

    #[test]
    fn test_parse_abbreviations() {
        assert_eq!("wed".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("thurs".parse::<Weekday>().unwrap(), Weekday::Thursday);
    }

    #[test]
    fn test_parse_unknown_name_is_an_error() {
        let err = "funday".parse::<Weekday>().unwrap_err();
        assert!(err.to_string().contains("funday"), "got: {err}");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Weekday::Tuesday).unwrap();
        assert_eq!(json, "\"tuesday\"");
        let parsed: Weekday = serde_json::from_str("\"saturday\"").unwrap();
        assert_eq!(parsed, Weekday::Saturday);
        assert!(serde_json::from_str::<Weekday>("\"Tuesday\"").is_err());
    }
}

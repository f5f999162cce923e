//! Wall-clock readings in an explicit timezone.
//!
//! A [`WallClock`] is a calendar date plus a time-of-day as displayed on a
//! clock in one named IANA zone. It is not an instant: the same reading
//! denotes different UTC instants in different zones, and during a DST fold
//! the same reading occurs twice in one zone. Conversion to an instant
//! happens only through [`WallClock::to_utc`], which resolves the offset in
//! effect on that date, never the offset in effect at call time.
//!
//! Every operation here takes the zone from the value itself. There is
//! deliberately no way to read "now" without naming a zone first, because
//! conflating the host's zone with the caller's zone is the classic bug in
//! this domain.

use std::fmt;

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{DateError, Result};

/// Parse an IANA timezone identifier.
pub(crate) fn parse_zone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| DateError::InvalidTimezone(id.to_string()))
}

/// A validated clock reading in a specific IANA timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    datetime: NaiveDateTime,
    zone: Tz,
}

impl WallClock {
    /// The current clock reading in the given zone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidTimezone`] if `zone` is not a recognized
    /// IANA identifier.
    pub fn now(zone: &str) -> Result<WallClock> {
        let tz = parse_zone(zone)?;
        Ok(WallClock {
            datetime: Utc::now().with_timezone(&tz).naive_local(),
            zone: tz,
        })
    }

    /// A clock reading from explicit calendar components.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidTimezone`] for an unknown zone and
    /// [`DateError::InvalidDate`] for impossible dates or out-of-range
    /// time components.
    pub fn from_ymd_hms(
        zone: &str,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<WallClock> {
        let tz = parse_zone(zone)?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))?;
        let datetime = date.and_hms_opt(hour, minute, second).ok_or_else(|| {
            DateError::InvalidDate(format!("{hour:02}:{minute:02}:{second:02}"))
        })?;
        Ok(WallClock { datetime, zone: tz })
    }

    /// A clock reading from an already-parsed naive datetime and zone.
    ///
    /// Used by the iCalendar codec, which validates its own input shape.
    pub fn from_naive_in(datetime: NaiveDateTime, zone: Tz) -> WallClock {
        WallClock { datetime, zone }
    }

    /// Project a UTC instant into `zone` as a clock reading.
    pub fn from_instant(instant: chrono::DateTime<Utc>, zone: &str) -> Result<WallClock> {
        let tz = parse_zone(zone)?;
        Ok(WallClock {
            datetime: instant.with_timezone(&tz).naive_local(),
            zone: tz,
        })
    }

    /// The ISO weekday (Monday=1 .. Sunday=7) of this reading's calendar
    /// date, independent of its time-of-day.
    pub fn iso_weekday(&self) -> u8 {
        self.datetime.date().weekday().number_from_monday() as u8
    }

    /// Shift the calendar date by `n` signed days.
    ///
    /// Uses calendar arithmetic, so month and year boundaries carry
    /// correctly. Zone and time-of-day are preserved.
    pub fn add_days(&self, n: i64) -> WallClock {
        WallClock {
            datetime: self.datetime + Duration::days(n),
            zone: self.zone,
        }
    }

    /// Replace the time-of-day, zeroing seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] for out-of-range components.
    pub fn with_time(&self, hour: u32, minute: u32) -> Result<WallClock> {
        let datetime = self
            .datetime
            .date()
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| DateError::InvalidDate(format!("{hour:02}:{minute:02}")))?;
        Ok(WallClock {
            datetime,
            zone: self.zone,
        })
    }

    /// Resolve this reading to the UTC instant it denotes in its zone,
    /// using the offset in effect on this reading's date.
    ///
    /// During a DST fold the reading occurs twice; the earlier occurrence
    /// is returned. During a spring-forward gap the reading denotes no
    /// instant at all.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::NonexistentLocalTime`] for readings inside a
    /// spring-forward gap.
    pub fn to_utc(&self) -> Result<chrono::DateTime<Utc>> {
        match self.zone.from_local_datetime(&self.datetime) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(first, _) => Ok(first.with_timezone(&Utc)),
            LocalResult::None => Err(DateError::NonexistentLocalTime(format!(
                "{} does not exist in {}",
                self.datetime, self.zone
            ))),
        }
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    pub fn second(&self) -> u32 {
        self.datetime.second()
    }

    /// The IANA zone this reading belongs to.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The zone's IANA identifier.
    pub fn zone_name(&self) -> &'static str {
        self.zone.name()
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.datetime.format("%Y-%m-%d %H:%M:%S"),
            self.zone.name()
        )
    }
}

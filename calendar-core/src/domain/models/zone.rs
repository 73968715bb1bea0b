//! Time zone attached to a calendar context.
use crate::error::CalendarError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zone {
    Utc,
    Fixed(FixedOffset),
    /// IANA zone such as `Europe/Paris`
    Named(Tz),
    /// The process local zone, looked up at every conversion
    Local,
}

impl Zone {
    /// Wall-clock time of `instant` in this zone
    pub fn to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Utc => instant.naive_utc(),
            Zone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
            Zone::Named(tz) => instant.with_timezone(tz).naive_local(),
            Zone::Local => instant.with_timezone(&Local).naive_local(),
        }
    }

    /// Instant for a wall-clock time, `None` when it falls in a gap.
    /// Ambiguous times resolve to the earlier instant.
    pub fn from_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Utc => Some(Utc.from_utc_datetime(local)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(local)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Local => Local
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Utc => f.write_str("UTC"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Local => f.write_str("local"),
        }
    }
}

/// Accepts `UTC`, `local`, offsets like `+02:00` and IANA names like `Asia/Jerusalem`
impl FromStr for Zone {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || CalendarError::InvalidTimeZone(s.to_string());

        match value.to_ascii_lowercase().as_str() {
            "utc" | "gmt" | "z" => return Ok(Zone::Utc),
            "local" => return Ok(Zone::Local),
            _ => {}
        }

        if value.starts_with(['+', '-']) {
            return value.parse::<FixedOffset>().map(Zone::Fixed).map_err(|_| invalid());
        }
        value.parse::<Tz>().map(Zone::Named).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Zone {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zone> for String {
    fn from(value: Zone) -> Self {
        value.to_string()
    }
}

//! Domain model for a date bound to a calendar, locale and time zone.
//!
//! Field extraction always goes through the attached context, never a
//! process-wide default, so two dates over the same instant built with
//! different calendars report different fields consistently.

use super::{Locale, Zone};
use crate::domain::systems::{weekday_of_fixed, CalendarIdentifier, CalendarSystem, YearMonthDay};
use crate::error::CalendarError;
use crate::host;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};

const VERY_SHORT_WEEKDAY_SYMBOLS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Calendar, locale and time zone used to interpret instants.
///
/// Unset locale and zone resolve against the host every time they are used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarContext {
    pub calendar: CalendarIdentifier,
    pub locale: Option<Locale>,
    pub time_zone: Option<Zone>,
}

impl CalendarContext {
    pub fn new(calendar: CalendarIdentifier) -> Self {
        Self {
            calendar,
            locale: None,
            time_zone: None,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_time_zone(mut self, zone: Zone) -> Self {
        self.time_zone = Some(zone);
        self
    }

    pub fn system(&self) -> CalendarSystem {
        self.calendar.system()
    }

    pub fn resolved_locale(&self) -> Locale {
        self.locale.clone().unwrap_or_else(host::preferred_locale)
    }

    pub fn resolved_zone(&self) -> Zone {
        self.time_zone.unwrap_or(Zone::Local)
    }

    /// First day of the week, 1 = Sunday ... 7 = Saturday
    pub fn first_weekday(&self) -> u32 {
        self.calendar
            .fixed_first_weekday()
            .unwrap_or_else(|| self.resolved_locale().first_weekday())
    }

    /// Very short weekday symbols starting from the first weekday
    pub fn weekday_symbols(&self) -> Vec<String> {
        let first = (self.first_weekday() - 1) as usize;
        (0..7)
            .map(|i| VERY_SHORT_WEEKDAY_SYMBOLS[(first + i) % 7].to_string())
            .collect()
    }

    pub fn date(&self, instant: DateTime<Utc>) -> CalendarDate {
        CalendarDate {
            instant,
            context: self.clone(),
        }
    }

    /// Build a date from calendar fields.
    ///
    /// Fails when the calendar has no such day, the time of day is out of
    /// range, or the wall-clock time falls in a gap of the zone.
    pub fn date_from_fields(
        &self,
        date: YearMonthDay,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<CalendarDate, CalendarError> {
        let composed = self.system().to_fixed(date).and_then(|fixed| {
            let time = NaiveTime::from_hms_opt(hour, minute, second)?;
            self.compose(fixed, time)
        });
        composed.ok_or_else(|| CalendarError::UnrepresentableDate {
            calendar: self.calendar,
            fields: format!("{} {:02}:{:02}:{:02}", date, hour, minute, second),
        })
    }

    /// Date at wall-clock `time` on fixed day `fixed`
    pub(crate) fn compose(&self, fixed: i64, time: NaiveTime) -> Option<CalendarDate> {
        let day = NaiveDate::from_num_days_from_ce_opt(i32::try_from(fixed).ok()?)?;
        let instant = self.resolved_zone().from_local(&day.and_time(time))?;
        Some(self.date(instant))
    }
}

/// Calendar fields of a date under its context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// 1 = Sunday ... 7 = Saturday
    pub weekday: u32,
    /// Day count shared by all calendars, 0001-01-01 Gregorian = 1
    pub fixed: i64,
    pub(crate) time: NaiveTime,
}

impl DateFields {
    pub fn ymd(&self) -> YearMonthDay {
        YearMonthDay::new(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    instant: DateTime<Utc>,
    context: CalendarContext,
}

impl CalendarDate {
    pub fn new(instant: DateTime<Utc>, context: CalendarContext) -> Self {
        Self { instant, context }
    }

    /// Gregorian date in UTC with an explicit locale
    pub fn utc(instant: DateTime<Utc>, locale: Locale) -> Self {
        CalendarContext::new(CalendarIdentifier::Gregorian)
            .with_locale(locale)
            .with_time_zone(Zone::Utc)
            .date(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn context(&self) -> &CalendarContext {
        &self.context
    }

    pub fn calendar(&self) -> CalendarIdentifier {
        self.context.calendar
    }

    /// Same instant interpreted through another context
    pub fn in_context(&self, context: &CalendarContext) -> CalendarDate {
        if &self.context == context {
            return self.clone();
        }
        context.date(self.instant)
    }

    pub fn fields(&self) -> DateFields {
        let local = self.context.resolved_zone().to_local(&self.instant);
        let fixed = local.date().num_days_from_ce() as i64;
        let date = self.context.system().from_fixed(fixed).unwrap_or_else(|| {
            log::warn!(
                "⚠️ {} is outside the {} calendar, reading ISO fields",
                self.instant,
                self.context.calendar
            );
            YearMonthDay::new(local.year(), local.month(), local.day())
        });
        let time = local.time();
        DateFields {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            weekday: weekday_of_fixed(fixed),
            fixed,
            time,
        }
    }

    pub fn year(&self) -> i32 {
        self.fields().year
    }

    pub fn month(&self) -> u32 {
        self.fields().month
    }

    pub fn day(&self) -> u32 {
        self.fields().day
    }

    pub fn hour(&self) -> u32 {
        self.fields().hour
    }

    pub fn minute(&self) -> u32 {
        self.fields().minute
    }

    pub fn second(&self) -> u32 {
        self.fields().second
    }

    /// Calendar-native weekday, 1 = Sunday ... 7 = Saturday
    pub fn weekday(&self) -> u32 {
        self.fields().weekday
    }

    pub fn month_name(&self) -> String {
        let fields = self.fields();
        self.context.system().month_name(fields.year, fields.month)
    }
}

/// An ordered `(minimum, maximum)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    minimum: CalendarDate,
    maximum: CalendarDate,
}

impl DateRange {
    /// Rejects a maximum earlier than the minimum
    pub fn new(minimum: CalendarDate, maximum: CalendarDate) -> Result<Self, CalendarError> {
        if maximum.instant() < minimum.instant() {
            return Err(CalendarError::InvertedRange {
                minimum: minimum.instant(),
                maximum: maximum.instant(),
            });
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(&self) -> &CalendarDate {
        &self.minimum
    }

    pub fn maximum(&self) -> &CalendarDate {
        &self.maximum
    }
}

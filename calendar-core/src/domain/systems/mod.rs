//! # Calendar Systems
//!
//! Calendar identifiers and the date arithmetic behind them. Conversions are
//! done by ICU4X through [`AnyCalendar`]; this module adds what a month grid
//! needs on top: a day count shared by every calendar, an absolute month
//! index for month stepping, and year stepping that keeps the month.
//!
//! Days are counted from 0001-01-01 of the proleptic Gregorian calendar as
//! day 1, the numbering chrono uses for `num_days_from_ce`. Months are the
//! ordinal position within their year, so a Hebrew leap year has 13 of them
//! and Nisan is month 7 or 8 depending on the year.

pub mod names;

use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate};
use icu::calendar::types::DateFields as IcuDateFields;
use icu::calendar::{AnyCalendar, AnyCalendarKind, Date, Ref};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean length of a lunation in days
const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Fixed day (with fraction) of the mean new moon of 2000-01-06 18:14 UTC
const MEAN_NEW_MOON: f64 = 730_125.76;

/// A calendar-native date triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonthDay {
    pub year: i32,
    /// Ordinal month within the year, starting at 1
    pub month: u32,
    pub day: u32,
}

impl YearMonthDay {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for YearMonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Weekday of a fixed day, 1 = Sunday ... 7 = Saturday.
///
/// Fixed day 1 was a Monday, so the remainder is already Sunday-based.
pub fn weekday_of_fixed(fixed: i64) -> u32 {
    fixed.rem_euclid(7) as u32 + 1
}

/// Supported calendar systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarIdentifier {
    #[default]
    Gregorian,
    /// Gregorian arithmetic with weeks always starting on Monday
    Iso8601,
    Buddhist,
    Chinese,
    Coptic,
    Dangi,
    Ethiopic,
    EthiopicAmeteAlem,
    Hebrew,
    Indian,
    /// Tabular Islamic calendar, Friday epoch
    IslamicCivil,
    /// Tabular Islamic calendar, Thursday epoch
    IslamicTabular,
    IslamicUmmAlQura,
    Japanese,
    Persian,
    Roc,
}

impl CalendarIdentifier {
    pub const ALL: [CalendarIdentifier; 16] = [
        CalendarIdentifier::Gregorian,
        CalendarIdentifier::Iso8601,
        CalendarIdentifier::Buddhist,
        CalendarIdentifier::Chinese,
        CalendarIdentifier::Coptic,
        CalendarIdentifier::Dangi,
        CalendarIdentifier::Ethiopic,
        CalendarIdentifier::EthiopicAmeteAlem,
        CalendarIdentifier::Hebrew,
        CalendarIdentifier::Indian,
        CalendarIdentifier::IslamicCivil,
        CalendarIdentifier::IslamicTabular,
        CalendarIdentifier::IslamicUmmAlQura,
        CalendarIdentifier::Japanese,
        CalendarIdentifier::Persian,
        CalendarIdentifier::Roc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarIdentifier::Gregorian => "gregorian",
            CalendarIdentifier::Iso8601 => "iso8601",
            CalendarIdentifier::Buddhist => "buddhist",
            CalendarIdentifier::Chinese => "chinese",
            CalendarIdentifier::Coptic => "coptic",
            CalendarIdentifier::Dangi => "dangi",
            CalendarIdentifier::Ethiopic => "ethiopic",
            CalendarIdentifier::EthiopicAmeteAlem => "ethioaa",
            CalendarIdentifier::Hebrew => "hebrew",
            CalendarIdentifier::Indian => "indian",
            CalendarIdentifier::IslamicCivil => "islamic-civil",
            CalendarIdentifier::IslamicTabular => "islamic-tbla",
            CalendarIdentifier::IslamicUmmAlQura => "islamic-umalqura",
            CalendarIdentifier::Japanese => "japanese",
            CalendarIdentifier::Persian => "persian",
            CalendarIdentifier::Roc => "roc",
        }
    }

    /// The ICU4X calendar backing this identifier
    pub fn kind(&self) -> AnyCalendarKind {
        match self {
            CalendarIdentifier::Gregorian => AnyCalendarKind::Gregorian,
            CalendarIdentifier::Iso8601 => AnyCalendarKind::Iso,
            CalendarIdentifier::Buddhist => AnyCalendarKind::Buddhist,
            CalendarIdentifier::Chinese => AnyCalendarKind::Chinese,
            CalendarIdentifier::Coptic => AnyCalendarKind::Coptic,
            CalendarIdentifier::Dangi => AnyCalendarKind::Dangi,
            CalendarIdentifier::Ethiopic => AnyCalendarKind::Ethiopian,
            CalendarIdentifier::EthiopicAmeteAlem => AnyCalendarKind::EthiopianAmeteAlem,
            CalendarIdentifier::Hebrew => AnyCalendarKind::Hebrew,
            CalendarIdentifier::Indian => AnyCalendarKind::Indian,
            CalendarIdentifier::IslamicCivil => AnyCalendarKind::HijriTabularTypeIIFriday,
            CalendarIdentifier::IslamicTabular => AnyCalendarKind::HijriTabularTypeIIThursday,
            CalendarIdentifier::IslamicUmmAlQura => AnyCalendarKind::HijriUmmAlQura,
            CalendarIdentifier::Japanese => AnyCalendarKind::Japanese,
            CalendarIdentifier::Persian => AnyCalendarKind::Persian,
            CalendarIdentifier::Roc => AnyCalendarKind::Roc,
        }
    }

    pub fn system(&self) -> CalendarSystem {
        CalendarSystem::new(*self)
    }

    /// First weekday imposed by the calendar itself, if any
    pub fn fixed_first_weekday(&self) -> Option<u32> {
        match self {
            CalendarIdentifier::Iso8601 => Some(2),
            _ => None,
        }
    }

    fn month_cycle(&self) -> MonthCycle {
        match self {
            CalendarIdentifier::Hebrew | CalendarIdentifier::Chinese | CalendarIdentifier::Dangi => {
                MonthCycle::Lunisolar
            }
            CalendarIdentifier::Coptic | CalendarIdentifier::Ethiopic | CalendarIdentifier::EthiopicAmeteAlem => {
                MonthCycle::Fixed(13)
            }
            _ => MonthCycle::Fixed(12),
        }
    }
}

impl fmt::Display for CalendarIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarIdentifier {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let identifier = match name.as_str() {
            "gregory" => CalendarIdentifier::Gregorian,
            "iso-8601" => CalendarIdentifier::Iso8601,
            "ethiopic-amete-alem" => CalendarIdentifier::EthiopicAmeteAlem,
            "islamic" | "islamicc" => CalendarIdentifier::IslamicCivil,
            _ => CalendarIdentifier::ALL
                .into_iter()
                .find(|identifier| identifier.as_str() == name)
                .ok_or_else(|| CalendarError::UnknownCalendar(name.clone()))?,
        };
        Ok(identifier)
    }
}

impl TryFrom<String> for CalendarIdentifier {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarIdentifier> for String {
    fn from(value: CalendarIdentifier) -> Self {
        value.as_str().to_string()
    }
}

/// How months line up with years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthCycle {
    /// Every year has the same number of months
    Fixed(i64),
    /// Leap years insert a month; months are counted by lunation
    Lunisolar,
}

/// Lunation number of the month starting on fixed day `start`
fn lunation(start: i64) -> i64 {
    ((start as f64 - MEAN_NEW_MOON) / SYNODIC_MONTH).round() as i64
}

fn ymd_of(date: &Date<Ref<'_, AnyCalendar>>) -> YearMonthDay {
    YearMonthDay::new(
        date.year().extended_year(),
        date.month().ordinal as u32,
        date.day_of_month().0 as u32,
    )
}

fn fixed_of(date: &Date<Ref<'_, AnyCalendar>>) -> Option<i64> {
    let iso = date.to_iso();
    let day = NaiveDate::from_ymd_opt(
        iso.year().extended_year(),
        iso.month().ordinal as u32,
        iso.day_of_month().0 as u32,
    )?;
    Some(day.num_days_from_ce() as i64)
}

/// Date arithmetic for one calendar.
///
/// Every query returns `None` for a triple the calendar does not have
/// (February 30th, Adar I in a common Hebrew year) or a day ICU4X cannot
/// represent.
#[derive(Debug)]
pub struct CalendarSystem {
    identifier: CalendarIdentifier,
    calendar: AnyCalendar,
}

impl CalendarSystem {
    pub fn new(identifier: CalendarIdentifier) -> Self {
        Self {
            identifier,
            calendar: AnyCalendar::new(identifier.kind()),
        }
    }

    pub fn identifier(&self) -> CalendarIdentifier {
        self.identifier
    }

    fn date_at(&self, fixed: i64) -> Option<Date<Ref<'_, AnyCalendar>>> {
        let iso = NaiveDate::from_num_days_from_ce_opt(i32::try_from(fixed).ok()?)?;
        let date = Date::try_new_iso(iso.year(), iso.month() as u8, iso.day() as u8).ok()?;
        Some(date.to_calendar(Ref(&self.calendar)))
    }

    fn date(&self, date: YearMonthDay) -> Option<Date<Ref<'_, AnyCalendar>>> {
        let mut fields = IcuDateFields::default();
        fields.extended_year = Some(date.year);
        fields.ordinal_month = Some(u8::try_from(date.month).ok()?);
        fields.day = Some(u8::try_from(date.day).ok()?);
        let resolved = Date::try_from_fields(fields, Default::default(), Ref(&self.calendar)).ok()?;

        // Out-of-range days may be constrained instead of rejected
        (ymd_of(&resolved) == date).then_some(resolved)
    }

    /// Date triple for a fixed day number
    pub fn from_fixed(&self, fixed: i64) -> Option<YearMonthDay> {
        self.date_at(fixed).map(|date| ymd_of(&date))
    }

    /// Fixed day number for a date triple
    pub fn to_fixed(&self, date: YearMonthDay) -> Option<i64> {
        fixed_of(&self.date(date)?)
    }

    pub fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        let first = self.date(YearMonthDay::new(year, month, 1))?;
        Some(first.days_in_month() as u32)
    }

    pub fn months_in_year(&self, year: i32) -> Option<u32> {
        let first = self.date(YearMonthDay::new(year, 1, 1))?;
        Some(first.months_in_year() as u32)
    }

    /// Month code such as `M06` or `M05L`
    pub fn month_code(&self, year: i32, month: u32) -> Option<String> {
        let first = self.date(YearMonthDay::new(year, month, 1))?;
        Some(first.month().standard_code.0.to_string())
    }

    /// Ordinal in `year` of the month `month` names in `from_year`.
    ///
    /// A leap month missing from `year` falls back to the month it doubles:
    /// Adar I to Adar, a Chinese leap month to its regular month.
    pub fn same_month_in_year(&self, from_year: i32, month: u32, year: i32) -> Option<u32> {
        if let MonthCycle::Fixed(_) = self.identifier.month_cycle() {
            return Some(month);
        }

        let code = self.month_code(from_year, month)?;
        let months = self.months_in_year(year)?;
        let find = |wanted: &str| {
            (1..=months).find(|&candidate| self.month_code(year, candidate).as_deref() == Some(wanted))
        };

        find(&code).or_else(|| {
            let regular = match self.identifier {
                CalendarIdentifier::Hebrew => "M06",
                _ => code.trim_end_matches('L'),
            };
            find(regular)
        })
    }

    /// Months between the calendar's reference point and `(year, month)`
    pub fn month_index(&self, year: i32, month: u32) -> Option<i64> {
        match self.identifier.month_cycle() {
            MonthCycle::Fixed(months) => Some(year as i64 * months + month as i64 - 1),
            MonthCycle::Lunisolar => {
                let start = self.to_fixed(YearMonthDay::new(year, month, 1))?;
                Some(lunation(start))
            }
        }
    }

    /// Inverse of [`CalendarSystem::month_index`]
    pub fn from_month_index(&self, index: i64) -> Option<(i32, u32)> {
        match self.identifier.month_cycle() {
            MonthCycle::Fixed(months) => {
                let year = i32::try_from(index.div_euclid(months)).ok()?;
                Some((year, (index.rem_euclid(months) + 1) as u32))
            }
            MonthCycle::Lunisolar => {
                // Any day mid-lunation lies inside the month of that lunation
                let middle = (MEAN_NEW_MOON + index as f64 * SYNODIC_MONTH + 15.0).floor() as i64;
                let date = self.from_fixed(middle)?;
                (self.month_index(date.year, date.month)? == index).then_some((date.year, date.month))
            }
        }
    }

    pub fn month_name(&self, year: i32, month: u32) -> String {
        match self.date(YearMonthDay::new(year, month, 1)) {
            Some(first) => names::month_name(
                self.identifier,
                &first.month().standard_code.0.to_string(),
                first.months_in_year() as u32,
            ),
            None => format!("M{:02}", month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(year: i32, month: u32, day: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().num_days_from_ce() as i64
    }

    #[test]
    fn test_weekday_of_fixed() {
        assert_eq!(weekday_of_fixed(1), 2); // 0001-01-01 was a Monday
        assert_eq!(weekday_of_fixed(fixed(2019, 6, 23)), 1); // Sunday
        assert_eq!(weekday_of_fixed(fixed(2019, 6, 29)), 7); // Saturday
        assert_eq!(weekday_of_fixed(fixed(2019, 6, 1)), 7);
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("gregorian".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Gregorian);
        assert_eq!("gregory".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Gregorian);
        assert_eq!("Hebrew".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Hebrew);
        assert_eq!("islamicc".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::IslamicCivil);
        assert_eq!("islamic-tbla".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::IslamicTabular);
        assert_eq!("persian".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Persian);
        assert_eq!("japanese".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Japanese);
        assert_eq!("chinese".parse::<CalendarIdentifier>().unwrap(), CalendarIdentifier::Chinese);
        assert_eq!(
            "islamic-umalqura".parse::<CalendarIdentifier>().unwrap(),
            CalendarIdentifier::IslamicUmmAlQura
        );

        let result = "mayan".parse::<CalendarIdentifier>();
        assert!(matches!(result, Err(CalendarError::UnknownCalendar(name)) if name == "mayan"));
    }

    #[test]
    fn test_identifier_round_trips_through_string() {
        for id in CalendarIdentifier::ALL {
            assert_eq!(id.to_string().parse::<CalendarIdentifier>().unwrap(), id);
        }
    }

    #[test]
    fn test_same_instant_differs_across_calendars() {
        let day = fixed(2019, 6, 23);

        assert_eq!(CalendarIdentifier::Gregorian.system().from_fixed(day), Some(YearMonthDay::new(2019, 6, 23)));
        assert_eq!(CalendarIdentifier::Hebrew.system().from_fixed(day), Some(YearMonthDay::new(5779, 10, 20)));
        assert_eq!(CalendarIdentifier::IslamicCivil.system().from_fixed(day), Some(YearMonthDay::new(1440, 10, 19)));
        assert_eq!(CalendarIdentifier::Persian.system().from_fixed(day), Some(YearMonthDay::new(1398, 4, 2)));
    }

    #[test]
    fn test_islamic_epochs() {
        // 1 Muharram AH 1, Julian 622-07-16
        assert_eq!(CalendarIdentifier::IslamicCivil.system().from_fixed(227_015), Some(YearMonthDay::new(1, 1, 1)));
        assert_eq!(CalendarIdentifier::IslamicTabular.system().from_fixed(227_015), Some(YearMonthDay::new(1, 1, 2)));
    }

    #[test]
    fn test_fixed_round_trip_all_systems() {
        let start = fixed(2000, 1, 1);
        for id in CalendarIdentifier::ALL {
            let system = id.system();
            for day in (start..start + 12_000).step_by(97) {
                let date = system.from_fixed(day).unwrap();
                assert_eq!(system.to_fixed(date), Some(day), "{} {}", id, date);
            }
        }
    }

    #[test]
    fn test_rejects_missing_dates() {
        let gregorian = CalendarIdentifier::Gregorian.system();
        assert_eq!(gregorian.to_fixed(YearMonthDay::new(1, 1, 1)), Some(1));
        assert!(gregorian.to_fixed(YearMonthDay::new(2019, 2, 29)).is_none());
        assert!(gregorian.to_fixed(YearMonthDay::new(2019, 13, 1)).is_none());

        let islamic = CalendarIdentifier::IslamicCivil.system();
        assert!(islamic.to_fixed(YearMonthDay::new(1440, 13, 1)).is_none());
        assert!(islamic.to_fixed(YearMonthDay::new(1440, 2, 30)).is_none());

        // 5780 is a common year with 12 months
        let hebrew = CalendarIdentifier::Hebrew.system();
        assert!(hebrew.to_fixed(YearMonthDay::new(5780, 13, 1)).is_none());
        assert!(hebrew.to_fixed(YearMonthDay::new(5779, 13, 1)).is_some());
    }

    #[test]
    fn test_month_lengths() {
        let gregorian = CalendarIdentifier::Gregorian.system();
        assert_eq!(gregorian.days_in_month(2025, 1), Some(31));
        assert_eq!(gregorian.days_in_month(2025, 4), Some(30));
        assert_eq!(gregorian.days_in_month(2025, 2), Some(28));
        assert_eq!(gregorian.days_in_month(2024, 2), Some(29));
        assert_eq!(gregorian.days_in_month(2025, 13), None);

        let hebrew = CalendarIdentifier::Hebrew.system();
        assert_eq!(hebrew.months_in_year(5779), Some(13));
        assert_eq!(hebrew.months_in_year(5780), Some(12));
    }

    #[test]
    fn test_hebrew_month_codes() {
        let hebrew = CalendarIdentifier::Hebrew.system();
        assert_eq!(hebrew.month_code(5779, 6).as_deref(), Some("M05L"));
        assert_eq!(hebrew.month_code(5779, 7).as_deref(), Some("M06"));
        assert_eq!(hebrew.month_code(5780, 6).as_deref(), Some("M06"));

        assert_eq!(hebrew.month_name(5779, 6), "Adar I");
        assert_eq!(hebrew.month_name(5779, 7), "Adar II");
        assert_eq!(hebrew.month_name(5780, 6), "Adar");
        assert_eq!(hebrew.month_name(5779, 10), "Sivan");
    }

    #[test]
    fn test_same_month_in_year() {
        let hebrew = CalendarIdentifier::Hebrew.system();
        // Sivan is month 10 in leap 5779 and month 9 in common 5780
        assert_eq!(hebrew.same_month_in_year(5779, 10, 5780), Some(9));
        assert_eq!(hebrew.same_month_in_year(5780, 9, 5782), Some(10));
        // Adar I has no counterpart in a common year and lands on Adar
        assert_eq!(hebrew.same_month_in_year(5779, 6, 5780), Some(6));

        let gregorian = CalendarIdentifier::Gregorian.system();
        assert_eq!(gregorian.same_month_in_year(2019, 6, 2029), Some(6));
    }

    #[test]
    fn test_month_index_rollover() {
        let gregorian = CalendarIdentifier::Gregorian.system();
        let december = gregorian.month_index(2019, 12).unwrap();
        assert_eq!(gregorian.from_month_index(december + 1), Some((2020, 1)));
        assert_eq!(gregorian.from_month_index(december - 12), Some((2018, 12)));

        let hebrew = CalendarIdentifier::Hebrew.system();
        let shevat = hebrew.month_index(5780, 5).unwrap();
        assert_eq!(hebrew.from_month_index(shevat + 1), Some((5780, 6)));
        assert_eq!(hebrew.from_month_index(shevat + 8), Some((5781, 1)));

        let leap_shevat = hebrew.month_index(5779, 5).unwrap();
        assert_eq!(hebrew.from_month_index(leap_shevat + 1), Some((5779, 6)));
    }

    #[test]
    fn test_month_index_round_trip_all_systems() {
        for id in CalendarIdentifier::ALL {
            let system = id.system();
            let start = system.from_fixed(fixed(2019, 6, 23)).unwrap();
            let base = system.month_index(start.year, start.month).unwrap();
            for offset in 0..60 {
                let (year, month) = system.from_month_index(base + offset).unwrap();
                assert_eq!(system.month_index(year, month), Some(base + offset), "{} +{}", id, offset);
                assert!(system.to_fixed(YearMonthDay::new(year, month, 1)).is_some());
            }
        }
    }
}

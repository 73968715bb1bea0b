//! Calendar arithmetic on [`CalendarDate`].
//!
//! Truncation, component addition, comparison at a granularity and
//! decomposed differences. Everything is computed through the date's own
//! calendar context. An operation that would produce a date the calendar or
//! time zone cannot represent returns the original date instead of failing.

use crate::domain::models::{CalendarDate, Component, DateComponents, DateFields};
use crate::domain::systems::YearMonthDay;
use crate::host::Clock;
use chrono::Duration;
use std::cmp::Ordering;
use std::ops::{Add, Sub};

impl CalendarDate {
    /// Zero `component` and every smaller component.
    ///
    /// `Month` yields the start of the year, `Day` the start of the month and
    /// `Hour` the start of the day. `Year` and `Week` leave the date as is.
    pub fn truncated_from(&self, component: Component) -> CalendarDate {
        use Component::*;
        let components: &[Component] = match component {
            Month => &[Month, Day, Hour, Minute, Second],
            Day => &[Day, Hour, Minute, Second],
            Hour => &[Hour, Minute, Second],
            Minute => &[Minute, Second],
            Second => &[Second],
            Year | Week => return self.clone(),
        };
        self.truncated_at(components)
    }

    /// Reset exactly the listed components (month and day to 1, time units to 0)
    pub fn truncated_at(&self, components: &[Component]) -> CalendarDate {
        let fields = self.fields();
        let mut date = fields.ymd();
        let (mut hour, mut minute, mut second) = (fields.hour, fields.minute, fields.second);

        for component in components {
            match component {
                Component::Month => date.month = 1,
                Component::Day => date.day = 1,
                Component::Hour => hour = 0,
                Component::Minute => minute = 0,
                Component::Second => second = 0,
                Component::Year | Component::Week => continue,
            }
        }

        self.context()
            .date_from_fields(date, hour, minute, second)
            .unwrap_or_else(|e| {
                log::warn!("⚠️ Cannot truncate {} at {:?}, keeping original date: {}", self.instant(), components, e);
                self.clone()
            })
    }

    /// First instant of the `unit` containing this date
    pub fn start_of(&self, unit: Component) -> CalendarDate {
        match unit {
            Component::Week => {
                let fields = self.fields();
                let offset = (fields.weekday + 7 - self.context().first_weekday()) % 7;
                self.start_of(Component::Day).adding(&DateComponents::days(-(offset as i64)))
            }
            _ => match unit.smaller() {
                Some(smaller) => self.truncated_from(smaller),
                None => self.clone(),
            },
        }
    }

    /// Calendar-aware addition; falls back to `self` when the result cannot be represented
    pub fn adding(&self, components: &DateComponents) -> CalendarDate {
        self.checked_adding(components).unwrap_or_else(|| {
            log::warn!("⚠️ Cannot add {:?} to {}, keeping original date", components, self.instant());
            self.clone()
        })
    }

    pub fn subtracting(&self, components: &DateComponents) -> CalendarDate {
        self.adding(&-*components)
    }

    /// Years, then months, move the (year, month) pair and clamp the day to the
    /// target month. Years keep the named month, so Sivan stays Sivan across a
    /// Hebrew leap year. Weeks and days move the day keeping the wall-clock time.
    /// Hours, minutes and seconds are added as elapsed time.
    pub(crate) fn checked_adding(&self, components: &DateComponents) -> Option<CalendarDate> {
        let system = self.context().system();
        let fields = self.fields();
        let mut fixed = fields.fixed;

        if components.year.is_some() || components.month.is_some() {
            let (mut year, mut month) = (fields.year, fields.month);
            if let Some(years) = components.year {
                let target = i32::try_from((year as i64).checked_add(years)?).ok()?;
                month = system.same_month_in_year(year, month, target)?;
                year = target;
            }
            if let Some(months) = components.month {
                let index = system.month_index(year, month)?.checked_add(months)?;
                (year, month) = system.from_month_index(index)?;
            }
            let day = fields.day.min(system.days_in_month(year, month)?);
            fixed = system.to_fixed(YearMonthDay::new(year, month, day))?;
        }

        let days = components
            .week
            .unwrap_or(0)
            .checked_mul(7)?
            .checked_add(components.day.unwrap_or(0))?;
        fixed = fixed.checked_add(days)?;

        let mut date = if fixed == fields.fixed {
            self.clone()
        } else {
            self.context().compose(fixed, fields.time)?
        };

        let seconds = components
            .hour
            .unwrap_or(0)
            .checked_mul(3600)?
            .checked_add(components.minute.unwrap_or(0).checked_mul(60)?)?
            .checked_add(components.second.unwrap_or(0))?;
        if seconds != 0 {
            let instant = date.instant().checked_add_signed(Duration::try_seconds(seconds)?)?;
            date = self.context().date(instant);
        }

        Some(date)
    }

    /// Number of days in the month containing this date
    pub fn days_in_month(&self) -> u32 {
        let fields = self.fields();
        self.context()
            .system()
            .days_in_month(fields.year, fields.month)
            .unwrap_or(fields.day)
    }

    /// Compare ignoring every unit finer than `granularity`.
    ///
    /// `other` is read through this date's calendar context.
    pub fn compare(&self, other: &CalendarDate, granularity: Component) -> Ordering {
        let a = self.fields();
        let b = other.in_context(self.context()).fields();

        let depth = match granularity {
            Component::Week => {
                let first = self.context().first_weekday();
                return week_start(&a, first).cmp(&week_start(&b, first));
            }
            Component::Year => 1,
            Component::Month => 2,
            Component::Day => 3,
            Component::Hour => 4,
            Component::Minute => 5,
            Component::Second => 6,
        };
        sort_key(&a)[..depth].cmp(&sort_key(&b)[..depth])
    }

    pub fn is_same_day(&self, other: &CalendarDate) -> bool {
        self.compare(other, Component::Day) == Ordering::Equal
    }

    pub fn is_before(&self, other: &CalendarDate, or_equal: bool, granularity: Component) -> bool {
        match self.compare(other, granularity) {
            Ordering::Less => true,
            Ordering::Equal => or_equal,
            Ordering::Greater => false,
        }
    }

    pub fn is_after(&self, other: &CalendarDate, or_equal: bool, granularity: Component) -> bool {
        match self.compare(other, granularity) {
            Ordering::Greater => true,
            Ordering::Equal => or_equal,
            Ordering::Less => false,
        }
    }

    /// Same day as the clock's current instant, under this date's context
    pub fn is_today(&self, clock: &dyn Clock) -> bool {
        self.is_same_day(&self.context().date(clock.now()))
    }

    /// Decomposed difference from `self` to `other` in the `wanted` units.
    ///
    /// Units are filled from the largest down, each taking the largest amount
    /// that does not overshoot `other`, so 537 days from 2019-06-23 is one
    /// year and five months.
    pub fn components_until(&self, other: &CalendarDate, wanted: &[Component]) -> DateComponents {
        let target = other.in_context(self.context());
        let forward = target.instant() >= self.instant();
        let step = if forward { 1 } else { -1 };

        let mut units = wanted.to_vec();
        units.sort();
        units.dedup();

        let mut result = DateComponents::default();
        for unit in units {
            let cursor = self.checked_adding(&result).unwrap_or_else(|| self.clone());
            let reaches = |amount: i64| {
                self.checked_adding(&result.with(unit, amount))
                    .map_or(false, |candidate| {
                        if forward {
                            candidate.instant() <= target.instant()
                        } else {
                            candidate.instant() >= target.instant()
                        }
                    })
            };

            let mut amount = estimate(&cursor, &target, unit);
            while amount != 0 && !reaches(amount) {
                amount -= step;
            }
            while reaches(amount + step) {
                amount += step;
            }
            result.set(unit, amount);
        }
        result
    }

    /// Decomposed difference from `earlier` to `self`
    pub fn components_since(&self, earlier: &CalendarDate, wanted: &[Component]) -> DateComponents {
        earlier.components_until(self, wanted)
    }
}

fn sort_key(fields: &DateFields) -> [i64; 6] {
    [
        fields.year as i64,
        fields.month as i64,
        fields.day as i64,
        fields.hour as i64,
        fields.minute as i64,
        fields.second as i64,
    ]
}

fn week_start(fields: &DateFields, first_weekday: u32) -> i64 {
    fields.fixed - ((fields.weekday + 7 - first_weekday) % 7) as i64
}

/// First guess for `components_until`, refined by stepping
fn estimate(cursor: &CalendarDate, target: &CalendarDate, unit: Component) -> i64 {
    let (a, b) = (cursor.fields(), target.fields());
    let system = cursor.context().system();
    match unit {
        Component::Year => (b.year - a.year) as i64,
        Component::Month => match (system.month_index(a.year, a.month), system.month_index(b.year, b.month)) {
            (Some(from), Some(to)) => to - from,
            _ => 0,
        },
        Component::Week => (b.fixed - a.fixed) / 7,
        Component::Day => b.fixed - a.fixed,
        Component::Hour | Component::Minute | Component::Second => {
            let elapsed = (target.instant() - cursor.instant()).num_seconds();
            elapsed / unit.fixed_seconds().unwrap_or(1)
        }
    }
}

impl Add<DateComponents> for CalendarDate {
    type Output = CalendarDate;

    fn add(self, rhs: DateComponents) -> CalendarDate {
        self.adding(&rhs)
    }
}

impl Add<DateComponents> for &CalendarDate {
    type Output = CalendarDate;

    fn add(self, rhs: DateComponents) -> CalendarDate {
        self.adding(&rhs)
    }
}

impl Sub<DateComponents> for CalendarDate {
    type Output = CalendarDate;

    fn sub(self, rhs: DateComponents) -> CalendarDate {
        self.subtracting(&rhs)
    }
}

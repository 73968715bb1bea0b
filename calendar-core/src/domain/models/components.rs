//! Calendar units and sets of unit amounts.
use std::ops::{Add, Neg};

/// Calendar units, ordered from largest to smallest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Component {
    /// Next finer unit used when truncating, `Week` is skipped
    pub fn smaller(&self) -> Option<Component> {
        match self {
            Component::Year => Some(Component::Month),
            Component::Month | Component::Week => Some(Component::Day),
            Component::Day => Some(Component::Hour),
            Component::Hour => Some(Component::Minute),
            Component::Minute => Some(Component::Second),
            Component::Second => None,
        }
    }

    /// Length in seconds of the units that have a fixed length
    pub(crate) fn fixed_seconds(&self) -> Option<i64> {
        match self {
            Component::Hour => Some(3600),
            Component::Minute => Some(60),
            Component::Second => Some(1),
            _ => None,
        }
    }
}

/// Amounts of calendar units; unset units are `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateComponents {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub week: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
}

impl DateComponents {
    pub fn of(component: Component, value: i64) -> Self {
        Self::default().with(component, value)
    }

    pub fn years(value: i64) -> Self {
        Self::of(Component::Year, value)
    }

    pub fn months(value: i64) -> Self {
        Self::of(Component::Month, value)
    }

    pub fn weeks(value: i64) -> Self {
        Self::of(Component::Week, value)
    }

    pub fn days(value: i64) -> Self {
        Self::of(Component::Day, value)
    }

    pub fn hours(value: i64) -> Self {
        Self::of(Component::Hour, value)
    }

    pub fn minutes(value: i64) -> Self {
        Self::of(Component::Minute, value)
    }

    pub fn seconds(value: i64) -> Self {
        Self::of(Component::Second, value)
    }

    pub fn value(&self, component: Component) -> Option<i64> {
        match component {
            Component::Year => self.year,
            Component::Month => self.month,
            Component::Week => self.week,
            Component::Day => self.day,
            Component::Hour => self.hour,
            Component::Minute => self.minute,
            Component::Second => self.second,
        }
    }

    fn slot(&mut self, component: Component) -> &mut Option<i64> {
        match component {
            Component::Year => &mut self.year,
            Component::Month => &mut self.month,
            Component::Week => &mut self.week,
            Component::Day => &mut self.day,
            Component::Hour => &mut self.hour,
            Component::Minute => &mut self.minute,
            Component::Second => &mut self.second,
        }
    }

    pub fn set(&mut self, component: Component, value: i64) {
        *self.slot(component) = Some(value);
    }

    pub fn with(mut self, component: Component, value: i64) -> Self {
        self.set(component, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn combine(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.saturating_add(b)),
        (a, b) => a.or(b),
    }
}

impl Add for DateComponents {
    type Output = DateComponents;

    fn add(self, rhs: DateComponents) -> DateComponents {
        DateComponents {
            year: combine(self.year, rhs.year),
            month: combine(self.month, rhs.month),
            week: combine(self.week, rhs.week),
            day: combine(self.day, rhs.day),
            hour: combine(self.hour, rhs.hour),
            minute: combine(self.minute, rhs.minute),
            second: combine(self.second, rhs.second),
        }
    }
}

impl Neg for DateComponents {
    type Output = DateComponents;

    fn neg(self) -> DateComponents {
        let negate = |v: Option<i64>| v.map(|v| v.saturating_neg());
        DateComponents {
            year: negate(self.year),
            month: negate(self.month),
            week: negate(self.week),
            day: negate(self.day),
            hour: negate(self.hour),
            minute: negate(self.minute),
            second: negate(self.second),
        }
    }
}

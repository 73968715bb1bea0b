//! Mapping between dates and cells of the paginated month grid.
//!
//! Each section is one calendar month counted from the grid's first month.
//! Items are the cells of that month's page, starting with the padding cells
//! that align day 1 under its weekday column. The indexer never checks the
//! upper section bound; callers clamp against the range's section count.

use crate::domain::models::{CalendarDate, Component, DateComponents};
use shared::GridCoordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIndexer {
    from_date: CalendarDate,
    first_weekday: u32,
}

impl GridIndexer {
    /// `from_date` is truncated to the start of its month. `first_weekday`
    /// (1 = Sunday ... 7 = Saturday) is taken modulo 7, so 8 is Sunday again.
    pub fn new(from_date: &CalendarDate, first_weekday: u32) -> Self {
        Self {
            from_date: from_date.start_of(Component::Month),
            first_weekday: (first_weekday % 7 + 6) % 7 + 1,
        }
    }

    pub fn from_date(&self) -> &CalendarDate {
        &self.from_date
    }

    pub fn first_weekday(&self) -> u32 {
        self.first_weekday
    }

    /// Leading padding cells before day 1 of the month starting at `month_start`
    pub fn weekday_offset(&self, month_start: &CalendarDate) -> usize {
        ((month_start.weekday() + 7 - self.first_weekday) % 7) as usize
    }

    /// Section holding `date`, `None` when its month precedes the first month
    pub fn section_of(&self, date: &CalendarDate) -> Option<usize> {
        let month_start = date.in_context(self.from_date.context()).start_of(Component::Month);
        let months = self
            .from_date
            .components_until(&month_start, &[Component::Month])
            .month
            .unwrap_or(0);
        usize::try_from(months).ok()
    }

    pub fn coordinate_of(&self, date: &CalendarDate) -> Option<GridCoordinate> {
        let section = self.section_of(date)?;
        let date = date.in_context(self.from_date.context());
        let offset = self.weekday_offset(&date.start_of(Component::Month));
        Some(GridCoordinate::new(section, date.day() as usize - 1 + offset))
    }

    /// Date of the cell at `coordinate`; padding cells resolve to days of the previous month
    pub fn date_of(&self, coordinate: GridCoordinate) -> CalendarDate {
        let month_start = self.month_start(coordinate.section);
        let offset = self.weekday_offset(&month_start);
        let days = coordinate.item as i64 - offset as i64;
        month_start.adding(&DateComponents::days(days))
    }

    /// First day of the month shown in `section`
    pub fn month_start(&self, section: usize) -> CalendarDate {
        self.from_date.adding(&DateComponents::months(section as i64))
    }

    /// Padding cells plus the days of the month
    pub fn items_in_section(&self, section: usize) -> usize {
        let month_start = self.month_start(section);
        self.weekday_offset(&month_start) + month_start.days_in_month() as usize
    }
}

//! Selectable range and the grid bounds derived from it.
//!
//! All derived values are recomputed inside the mutators, so no grid query
//! can observe a range that is half updated.

use crate::domain::grid_indexer::GridIndexer;
use crate::domain::models::{CalendarContext, CalendarDate, Component, DateComponents, DateRange};
use crate::domain::time_of_day;
use chrono::{DateTime, Utc};
use shared::GridCoordinate;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct RangeModel {
    context: CalendarContext,
    minimum_date: CalendarDate,
    maximum_date: CalendarDate,
    from_date: CalendarDate,
    to_date_exclusive: CalendarDate,
    section_count: usize,
}

impl RangeModel {
    /// An inverted range is not rejected here: it yields an empty grid
    pub fn new(context: CalendarContext, minimum: DateTime<Utc>, maximum: DateTime<Utc>) -> Self {
        let minimum_date = context.date(minimum);
        let maximum_date = context.date(maximum);
        let mut model = Self {
            from_date: minimum_date.clone(),
            to_date_exclusive: minimum_date.clone(),
            context,
            minimum_date,
            maximum_date,
            section_count: 0,
        };
        model.rederive();
        model
    }

    pub fn from_range(range: &DateRange) -> Self {
        Self::new(
            range.minimum().context().clone(),
            range.minimum().instant(),
            range.maximum().instant(),
        )
    }

    pub fn set_minimum_date(&mut self, minimum: DateTime<Utc>) {
        self.minimum_date = self.context.date(minimum);
        self.rederive();
    }

    pub fn set_maximum_date(&mut self, maximum: DateTime<Utc>) {
        self.maximum_date = self.context.date(maximum);
        self.rederive();
    }

    /// Switch calendar, locale or time zone keeping the bounding instants
    pub fn set_context(&mut self, context: CalendarContext) {
        self.minimum_date = self.minimum_date.in_context(&context);
        self.maximum_date = self.maximum_date.in_context(&context);
        self.context = context;
        self.rederive();
    }

    fn rederive(&mut self) {
        self.from_date = self.minimum_date.start_of(Component::Month);

        if self.maximum_date.instant() < self.minimum_date.instant() {
            log::warn!(
                "⚠️ Maximum date {} is before minimum date {}, showing an empty grid",
                self.maximum_date.instant(),
                self.minimum_date.instant()
            );
            self.to_date_exclusive = self.from_date.clone();
            self.section_count = 0;
            return;
        }

        self.to_date_exclusive = self
            .maximum_date
            .start_of(Component::Month)
            .adding(&DateComponents::months(1));
        let months = self
            .from_date
            .components_until(&self.to_date_exclusive, &[Component::Month])
            .month
            .unwrap_or(0);
        self.section_count = usize::try_from(months).unwrap_or(0);

        log::info!(
            "📅 Range {} .. {} in {} covers {} months",
            self.from_date.instant(),
            self.to_date_exclusive.instant(),
            self.context.calendar,
            self.section_count
        );
    }

    pub fn context(&self) -> &CalendarContext {
        &self.context
    }

    pub fn minimum_date(&self) -> &CalendarDate {
        &self.minimum_date
    }

    pub fn maximum_date(&self) -> &CalendarDate {
        &self.maximum_date
    }

    /// Start of the minimum date's month
    pub fn from_date(&self) -> &CalendarDate {
        &self.from_date
    }

    /// Start of the month after the maximum date's month
    pub fn to_date_exclusive(&self) -> &CalendarDate {
        &self.to_date_exclusive
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Indexer for the current range, built from the current context
    pub fn indexer(&self) -> GridIndexer {
        GridIndexer::new(&self.from_date, self.context.first_weekday())
    }

    /// Within `[minimum, maximum]` at day granularity, bounds included
    pub fn is_in_range(&self, date: &CalendarDate) -> bool {
        date.compare(&self.minimum_date, Component::Day) != Ordering::Less
            && date.compare(&self.maximum_date, Component::Day) != Ordering::Greater
    }

    /// The cell resolves to a day before the first day of its section's month
    pub fn is_padding_cell(&self, coordinate: GridCoordinate) -> bool {
        let indexer = self.indexer();
        let month_start = indexer.month_start(coordinate.section);
        coordinate.item < indexer.weekday_offset(&month_start)
    }

    pub fn is_enabled(&self, coordinate: GridCoordinate) -> bool {
        !self.is_padding_cell(coordinate) && self.is_in_range(&self.indexer().date_of(coordinate))
    }

    /// Coordinate of `date` if its month is one of the grid's sections
    pub fn visible_coordinate(&self, date: &CalendarDate) -> Option<GridCoordinate> {
        self.indexer()
            .coordinate_of(date)
            .filter(|coordinate| coordinate.section < self.section_count)
    }

    /// Clamp to the last section and its last item, `None` for an empty grid
    pub fn clamp_coordinate(&self, coordinate: GridCoordinate) -> Option<GridCoordinate> {
        let last_section = self.section_count.checked_sub(1)?;
        let section = coordinate.section.min(last_section);
        let last_item = self.indexer().items_in_section(section).saturating_sub(1);
        Some(GridCoordinate::new(section, coordinate.item.min(last_item)))
    }

    /// Nearest bound when `date` falls outside `[minimum, maximum]`
    pub fn clamp(&self, date: &CalendarDate) -> CalendarDate {
        time_of_day::clamp(date, &self.minimum_date, &self.maximum_date)
    }
}

impl DateRange {
    /// Inclusive containment at day granularity
    pub fn contains(&self, date: &CalendarDate) -> bool {
        !date.is_before(self.minimum(), false, Component::Day) && !date.is_after(self.maximum(), false, Component::Day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Locale, Zone};
    use crate::domain::systems::{CalendarIdentifier, YearMonthDay};
    use chrono::TimeZone;

    fn context() -> CalendarContext {
        CalendarContext::new(CalendarIdentifier::Gregorian)
            .with_locale(Locale::parse("en_US").unwrap())
            .with_time_zone(Zone::Utc)
    }

    fn at(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        context()
            .date_from_fields(YearMonthDay::new(year, month, day), 0, 0, 0)
            .unwrap()
    }

    // 2019-06-23T10:12:31Z .. 2019-08-10T08:00:00Z
    fn sample_model() -> RangeModel {
        RangeModel::new(context(), at(1561284751), at(1565424000))
    }

    #[test]
    fn test_derived_bounds() {
        let model = sample_model();
        assert_eq!(model.from_date(), &ymd(2019, 6, 1));
        assert_eq!(model.to_date_exclusive(), &ymd(2019, 9, 1));
        assert_eq!(model.section_count(), 3);

        assert!(model.from_date().instant() <= model.minimum_date().instant());
        assert!(model.to_date_exclusive().instant() > model.maximum_date().instant());
        assert_eq!(model.to_date_exclusive().day(), 1);
        assert_eq!(model.to_date_exclusive().hour(), 0);
    }

    #[test]
    fn test_ten_year_range_section_count() {
        let model = RangeModel::new(context(), at(1561284751), ymd(2029, 6, 23).instant());
        assert_eq!(model.section_count(), 121);
    }

    #[test]
    fn test_enabled_cells_respect_bounds() {
        let model = sample_model();
        let indexer = model.indexer();
        let cell = |y, m, d| indexer.coordinate_of(&ymd(y, m, d)).unwrap();

        // Bounds are inclusive at day granularity, regardless of time of day
        assert!(model.is_enabled(cell(2019, 6, 23)));
        assert!(model.is_enabled(cell(2019, 8, 10)));
        assert!(model.is_enabled(cell(2019, 7, 15)));

        assert!(!model.is_enabled(cell(2019, 6, 22)));
        assert!(!model.is_enabled(cell(2019, 8, 11)));
        assert!(!model.is_enabled(cell(2019, 6, 1)));
    }

    #[test]
    fn test_padding_cells() {
        let model = sample_model();
        // June 2019 has six leading blanks, July one
        for item in 0..6 {
            assert!(model.is_padding_cell(GridCoordinate::new(0, item)));
            assert!(!model.is_enabled(GridCoordinate::new(0, item)));
        }
        assert!(!model.is_padding_cell(GridCoordinate::new(0, 6)));
        assert!(model.is_padding_cell(GridCoordinate::new(1, 0)));
        assert!(!model.is_padding_cell(GridCoordinate::new(1, 1)));
        // Padding cells stay disabled even when the resolved day is in range
        assert!(model.indexer().date_of(GridCoordinate::new(1, 0)).day() == 30);
        assert!(!model.is_enabled(GridCoordinate::new(1, 0)));
    }

    #[test]
    fn test_mutators_rederive_immediately() {
        let mut model = sample_model();
        model.set_maximum_date(ymd(2019, 12, 31).instant());
        assert_eq!(model.section_count(), 7);
        assert_eq!(model.to_date_exclusive(), &ymd(2020, 1, 1));

        model.set_minimum_date(ymd(2019, 11, 2).instant());
        assert_eq!(model.section_count(), 2);
        assert_eq!(model.from_date(), &ymd(2019, 11, 1));
        assert!(model.is_enabled(model.indexer().coordinate_of(&ymd(2019, 11, 2)).unwrap()));
    }

    #[test]
    fn test_inverted_range_yields_empty_grid() {
        let mut model = sample_model();
        model.set_maximum_date(ymd(2019, 1, 1).instant());

        assert_eq!(model.section_count(), 0);
        assert_eq!(model.from_date(), model.to_date_exclusive());
        assert!(model.from_date().instant() <= model.to_date_exclusive().instant());
        assert_eq!(model.clamp_coordinate(GridCoordinate::new(3, 3)), None);
        assert_eq!(model.visible_coordinate(&ymd(2019, 6, 23)), None);
    }

    #[test]
    fn test_set_context_changes_sections() {
        let mut model = sample_model();
        let hebrew = CalendarContext::new(CalendarIdentifier::Hebrew)
            .with_locale(Locale::parse("he_IL").unwrap())
            .with_time_zone(Zone::Utc);
        model.set_context(hebrew);

        // 20 Sivan 5779 .. 9 Av 5779
        assert_eq!(model.from_date().month(), 10);
        assert_eq!(model.to_date_exclusive().month(), 13);
        assert_eq!(model.section_count(), 3);
        assert_eq!(model.minimum_date().instant(), at(1561284751));
    }

    #[test]
    fn test_visible_and_clamped_coordinates() {
        let model = sample_model();
        assert_eq!(model.visible_coordinate(&ymd(2019, 7, 1)), Some(GridCoordinate::new(1, 1)));
        assert_eq!(model.visible_coordinate(&ymd(2019, 9, 1)), None);
        assert_eq!(model.visible_coordinate(&ymd(2019, 5, 1)), None);

        assert_eq!(model.clamp_coordinate(GridCoordinate::new(7, 2)), Some(GridCoordinate::new(2, 2)));
        // August 2019 starts on a Thursday: 4 blanks + 31 days
        assert_eq!(model.clamp_coordinate(GridCoordinate::new(2, 99)), Some(GridCoordinate::new(2, 34)));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let model = sample_model();
        assert_eq!(model.clamp(&ymd(2019, 1, 1)), *model.minimum_date());
        assert_eq!(model.clamp(&ymd(2020, 1, 1)), *model.maximum_date());
        assert_eq!(model.clamp(&ymd(2019, 7, 1)), ymd(2019, 7, 1));
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::new(ymd(2019, 6, 23), ymd(2019, 8, 10)).unwrap();
        assert!(range.contains(&context().date(at(1561284751))));
        assert!(range.contains(&ymd(2019, 8, 10)));
        assert!(!range.contains(&ymd(2019, 8, 11)));
        assert!(!range.contains(&ymd(2019, 6, 22)));

        let model = RangeModel::from_range(&range);
        assert_eq!(model.section_count(), 3);
    }
}

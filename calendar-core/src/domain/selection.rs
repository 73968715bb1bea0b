//! # Selection State Module
//!
//! Holds the selected date and the "today" reference used for highlighting.
//!
//! ## Responsibilities:
//! - Replacing or clearing the selection
//! - Reporting which grid cells a selection change invalidates
//! - Snapshotting "today" once per rendering pass
//!
//! "Today" and "selected" are independent: a cell can be either, both or neither.

use crate::domain::models::{CalendarContext, CalendarDate};
use crate::domain::range_model::RangeModel;
use crate::host::Clock;
use shared::GridCoordinate;

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<CalendarDate>,
    today: Option<CalendarDate>,
}

impl SelectionState {
    pub fn new(selected: Option<CalendarDate>) -> Self {
        Self { selected, today: None }
    }

    pub fn selected(&self) -> Option<&CalendarDate> {
        self.selected.as_ref()
    }

    pub fn today(&self) -> Option<&CalendarDate> {
        self.today.as_ref()
    }

    /// Take a new "today" snapshot; every cell of a pass compares against it
    pub fn refresh_today(&mut self, context: &CalendarContext, clock: &dyn Clock) {
        self.today = Some(context.date(clock.now()));
    }

    pub fn is_today(&self, date: &CalendarDate) -> bool {
        self.today.as_ref().is_some_and(|today| date.is_same_day(today))
    }

    pub fn is_selected(&self, date: &CalendarDate) -> bool {
        self.selected.as_ref().is_some_and(|selected| date.is_same_day(selected))
    }

    /// Replace the selection, returning the coordinates whose cells must be redrawn.
    ///
    /// The new selection's cell is only included when it is a different day
    /// from the previous one.
    pub fn select(&mut self, date: Option<CalendarDate>, range: &RangeModel) -> Vec<GridCoordinate> {
        let previous = std::mem::replace(&mut self.selected, date);
        let mut invalidated = Vec::new();

        if let Some(coordinate) = previous.as_ref().and_then(|p| range.visible_coordinate(p)) {
            invalidated.push(coordinate);
        }

        if let Some(current) = &self.selected {
            let same_day = previous.as_ref().is_some_and(|p| p.is_same_day(current));
            if !same_day {
                if let Some(coordinate) = range.visible_coordinate(current) {
                    invalidated.push(coordinate);
                }
            }
        }

        log::debug!(
            "📌 Selection {:?} -> {:?}, {} cells invalidated",
            previous.as_ref().map(CalendarDate::instant),
            self.selected.as_ref().map(CalendarDate::instant),
            invalidated.len()
        );
        invalidated
    }

    /// Re-express the selection and "today" in another calendar context
    pub fn set_context(&mut self, context: &CalendarContext) {
        self.selected = self.selected.as_ref().map(|date| date.in_context(context));
        self.today = self.today.as_ref().map(|date| date.in_context(context));
    }
}

//! Hour/minute entry and the fold state of the time panels.
//!
//! Fold transitions:
//!
//! ```text
//! folded --date selected--> date
//! date   --toggle (date_and_time only)--> picker
//! picker --toggle | focus lost--> date
//! any    --hide | commit--> folded
//! ```

use crate::domain::models::{CalendarDate, Component, DateComponents};
use crate::domain::range_model::RangeModel;
use shared::{DisplayMode, FoldState};

/// `date` truncated to its day, plus `hour` hours and `minute` minutes
pub fn compose_time(date: &CalendarDate, hour: u32, minute: u32) -> CalendarDate {
    date.truncated_from(Component::Hour)
        .adding(&(DateComponents::hours(hour as i64) + DateComponents::minutes(minute as i64)))
}

/// `date` if within `[minimum, maximum]`, otherwise the nearer bound
pub fn clamp(date: &CalendarDate, minimum: &CalendarDate, maximum: &CalendarDate) -> CalendarDate {
    if date.instant() < minimum.instant() {
        minimum.clone()
    } else if date.instant() > maximum.instant() {
        maximum.clone()
    } else {
        date.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayState {
    hour: u32,
    minute: u32,
    fold: FoldState,
    mode: DisplayMode,
}

impl TimeOfDayState {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            hour: 0,
            minute: 0,
            fold: FoldState::Folded,
            mode,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn fold(&self) -> FoldState {
        self.fold
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switching to date-only closes an open time wheel; returns whether the fold state changed
    pub fn set_mode(&mut self, mode: DisplayMode) -> bool {
        self.mode = mode;
        if mode == DisplayMode::Date && self.fold == FoldState::Picker {
            return self.transition(FoldState::Date);
        }
        false
    }

    /// Store wheel values, clamping out-of-range input to 23:59
    pub fn set_time(&mut self, hour: u32, minute: u32) {
        if hour > 23 || minute > 59 {
            log::warn!("⚠️ Time {}:{} out of range, clamping", hour, minute);
        }
        self.hour = hour.min(23);
        self.minute = minute.min(59);
    }

    /// Load the wheel values from `date`
    pub fn sync_from(&mut self, date: &CalendarDate) {
        let fields = date.fields();
        self.hour = fields.hour;
        self.minute = fields.minute;
    }

    /// The wheel's time applied to `date`, clamped to the range
    pub fn compose(&self, date: &CalendarDate, range: &RangeModel) -> CalendarDate {
        range.clamp(&compose_time(date, self.hour, self.minute))
    }

    /// A date was selected in the grid
    pub fn unfold_date(&mut self) -> bool {
        self.transition(FoldState::Date)
    }

    pub fn toggle_picker(&mut self) -> bool {
        match (self.fold, self.mode) {
            (FoldState::Date, DisplayMode::DateAndTime) => self.transition(FoldState::Picker),
            (FoldState::Picker, _) => self.transition(FoldState::Date),
            _ => false,
        }
    }

    pub fn focus_lost(&mut self) -> bool {
        if self.fold == FoldState::Picker {
            return self.transition(FoldState::Date);
        }
        false
    }

    /// Host hid or committed the picker
    pub fn fold_away(&mut self) -> bool {
        self.transition(FoldState::Folded)
    }

    fn transition(&mut self, to: FoldState) -> bool {
        if self.fold == to {
            return false;
        }
        log::debug!("🔀 Fold state {:?} -> {:?}", self.fold, to);
        self.fold = to;
        true
    }
}

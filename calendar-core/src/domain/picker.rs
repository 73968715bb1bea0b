//! # Picker Module
//!
//! The component a rendering layer drives: one instance per on-screen picker.
//!
//! ## Responsibilities:
//! - Owning the range, selection and time-of-day state
//! - Answering per-cell and per-section queries
//! - Turning taps, wheel changes and host calls into state transitions
//! - Notifying observers registered on this instance
//!
//! Configuration mutators recompute everything they affect before returning,
//! so queries issued afterwards never see a stale range. Observers are owned
//! by the picker and dropped with it.

use crate::config::PickerConfig;
use crate::domain::models::{CalendarContext, CalendarDate, Locale, Zone};
use crate::domain::range_model::RangeModel;
use crate::domain::selection::SelectionState;
use crate::domain::systems::CalendarIdentifier;
use crate::domain::time_of_day::{compose_time, TimeOfDayState};
use crate::host::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use shared::{
    CalendarCell, CalendarDayType, DisplayMode, FoldState, GridCoordinate, MonthHeader, PickerEvent,
    TimeLabel, ValueChange,
};
use std::fmt;

/// Handle returned by [`Picker::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PickerEvent)>;

/// Cells to redraw and where to scroll after a programmatic selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDateOutcome {
    pub invalidated: Vec<GridCoordinate>,
    /// `None` when the grid is empty
    pub scroll_to: Option<GridCoordinate>,
}

pub struct Picker {
    range: RangeModel,
    selection: SelectionState,
    time: TimeOfDayState,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    time_label: Option<TimeLabel>,
}

impl Picker {
    pub fn new(config: &PickerConfig, clock: Box<dyn Clock>) -> Self {
        let context = config.context();
        let range = RangeModel::new(context.clone(), config.minimum_date, config.maximum_date);
        let selected = config
            .selected_date
            .map(|instant| range.clamp(&context.date(instant)));

        let mut time = TimeOfDayState::new(config.display_mode);
        if let Some(date) = &selected {
            time.sync_from(date);
        }

        let mut picker = Self {
            range,
            selection: SelectionState::new(selected),
            time,
            clock,
            listeners: Vec::new(),
            next_subscription: 0,
            time_label: None,
        };
        picker.render_time_label();
        picker
    }

    /// Picker reading the system clock
    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(config, Box::new(SystemClock))
    }

    pub fn context(&self) -> &CalendarContext {
        self.range.context()
    }

    pub fn range(&self) -> &RangeModel {
        &self.range
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_date(&self) -> Option<&CalendarDate> {
        self.selection.selected()
    }

    pub fn fold_state(&self) -> FoldState {
        self.time.fold()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.time.mode()
    }

    pub fn time_label(&self) -> Option<&TimeLabel> {
        self.time_label.as_ref()
    }

    pub fn section_count(&self) -> usize {
        self.range.section_count()
    }

    pub fn items_in_section(&self, section: usize) -> usize {
        self.range.indexer().items_in_section(section)
    }

    // Configuration

    pub fn set_minimum_date(&mut self, minimum: DateTime<Utc>) {
        self.range.set_minimum_date(minimum);
    }

    pub fn set_maximum_date(&mut self, maximum: DateTime<Utc>) {
        self.range.set_maximum_date(maximum);
    }

    pub fn set_calendar(&mut self, calendar: CalendarIdentifier) {
        let context = CalendarContext {
            calendar,
            ..self.context().clone()
        };
        self.set_context(context);
    }

    /// `None` follows the host's preferred locale
    pub fn set_locale(&mut self, locale: Option<Locale>) {
        let context = CalendarContext {
            locale,
            ..self.context().clone()
        };
        self.set_context(context);
    }

    /// `None` follows the process local zone
    pub fn set_time_zone(&mut self, time_zone: Option<Zone>) {
        let context = CalendarContext {
            time_zone,
            ..self.context().clone()
        };
        self.set_context(context);
    }

    fn set_context(&mut self, context: CalendarContext) {
        self.selection.set_context(&context);
        self.range.set_context(context);
        if let Some(date) = self.selection.selected() {
            self.time.sync_from(date);
        }
        self.render_time_label();
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.time.set_mode(mode) {
            self.fold_state_changed();
        }
    }

    // Rendering queries

    /// Snapshot "today" for the cells of one rendering pass
    pub fn begin_pass(&mut self) {
        self.selection.refresh_today(self.range.context(), self.clock.as_ref());
    }

    pub fn cell(&self, coordinate: GridCoordinate) -> CalendarCell {
        let date = self.range.indexer().date_of(coordinate);
        let padding = self.range.is_padding_cell(coordinate);
        let day_type = if padding {
            CalendarDayType::PaddingBefore
        } else {
            CalendarDayType::MonthDay
        };

        CalendarCell {
            coordinate,
            date: date.instant(),
            day: if padding { 0 } else { date.day() },
            day_type,
            enabled: !padding && self.range.is_in_range(&date),
            today: !padding && self.selection.is_today(&date),
            selected: !padding && self.selection.is_selected(&date),
        }
    }

    pub fn month_header(&self, section: usize) -> MonthHeader {
        let month_start = self.range.indexer().month_start(section);
        let fields = month_start.fields();
        MonthHeader {
            section,
            year: fields.year,
            month: fields.month,
            title: format!("{} {}", month_start.month_name(), fields.year),
            weekday_symbols: self.context().weekday_symbols(),
        }
    }

    // User interaction

    /// Select the tapped day, keeping the previous selection's time of day.
    ///
    /// Padding and disabled cells are ignored.
    pub fn tap(&mut self, coordinate: GridCoordinate) -> Vec<GridCoordinate> {
        if !self.range.is_enabled(coordinate) {
            log::debug!("👆 Ignoring tap on disabled cell {}", coordinate);
            return Vec::new();
        }

        let day = self.range.indexer().date_of(coordinate);
        let time_source = match self.selection.selected() {
            Some(selected) => selected.clone(),
            None => self.context().date(self.clock.now()),
        };
        let fields = time_source.fields();
        let date = self.range.clamp(&compose_time(&day, fields.hour, fields.minute));

        let invalidated = self.select(date.clone());
        if self.time.unfold_date() {
            self.fold_state_changed();
        }
        self.emit(PickerEvent::DateSelected(date.instant()));
        invalidated
    }

    /// Programmatic selection, clamped to the range
    pub fn set_date(&mut self, instant: DateTime<Utc>) -> SetDateOutcome {
        let date = self.range.clamp(&self.context().date(instant));
        let scroll_to = self
            .range
            .indexer()
            .coordinate_of(&date)
            .and_then(|coordinate| self.range.clamp_coordinate(coordinate));

        let invalidated = self.select(date);
        if self.time.unfold_date() {
            self.fold_state_changed();
        }
        SetDateOutcome { invalidated, scroll_to }
    }

    /// Time wheel moved; ignored when only dates can be picked
    pub fn set_time(&mut self, hour: u32, minute: u32) -> Vec<GridCoordinate> {
        if self.time.mode() == DisplayMode::Date {
            log::debug!("🕐 Ignoring time {}:{} in date-only mode", hour, minute);
            return Vec::new();
        }

        self.time.set_time(hour, minute);
        let base = match self.selection.selected() {
            Some(selected) => selected.clone(),
            None => self.context().date(self.clock.now()),
        };
        let date = self.time.compose(&base, &self.range);

        let invalidated = self.select(date);
        self.emit(PickerEvent::ValueChanged(ValueChange::TimeChanged));
        invalidated
    }

    pub fn toggle_time_picker(&mut self) -> bool {
        let changed = self.time.toggle_picker();
        if changed {
            self.fold_state_changed();
        }
        changed
    }

    /// The grid started scrolling; an open time wheel loses focus
    pub fn begin_drag(&mut self) {
        self.emit(PickerEvent::ValueChanged(ValueChange::DragStarted));
        if self.time.focus_lost() {
            self.fold_state_changed();
        }
    }

    pub fn end_editing(&mut self) {
        if self.time.focus_lost() {
            self.fold_state_changed();
        }
    }

    pub fn hide(&mut self) {
        if self.time.fold_away() {
            self.fold_state_changed();
        }
    }

    /// Confirm the current selection and fold the time panels
    pub fn commit(&mut self) {
        if let Some(selected) = self.selection.selected() {
            let instant = selected.instant();
            self.emit(PickerEvent::DateSelected(instant));
        }
        self.hide();
    }

    // Observers

    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether `id` was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn select(&mut self, date: CalendarDate) -> Vec<GridCoordinate> {
        self.time.sync_from(&date);
        let invalidated = self.selection.select(Some(date), &self.range);
        self.render_time_label();
        invalidated
    }

    fn fold_state_changed(&mut self) {
        self.render_time_label();
        let state = self.time.fold();
        self.emit(PickerEvent::ValueChanged(ValueChange::FoldStateChanged(state)));
    }

    fn render_time_label(&mut self) {
        self.time_label = self.selection.selected().map(|date| {
            let fields = date.fields();
            TimeLabel {
                date_text: format!("{} {}, {}", date.month_name(), fields.day, fields.year),
                time_text: format!("{:02}:{:02}", fields.hour, fields.minute),
            }
        });
    }

    fn emit(&mut self, event: PickerEvent) {
        log::debug!("📣 {:?} to {} listeners", event, self.listeners.len());
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for Picker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("range", &self.range)
            .field("selection", &self.selection)
            .field("time", &self.time)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//! Toolkit-independent core of a calendar date/time picker.
//!
//! Maps dates of any supported calendar system onto a paginated month grid
//! and keeps the selection, time-of-day and fold state a picker needs. A
//! rendering layer drives a [`Picker`] and draws whatever it reports.
//!
//! ```no_run
//! use calendar_core::{GridCoordinate, Picker, PickerConfig};
//!
//! let config = PickerConfig::from_yaml_str("calendar: hebrew\nlocale: he_IL").unwrap();
//! let mut picker = Picker::from_config(&config);
//! picker.subscribe(|event| println!("{:?}", event));
//! picker.begin_pass();
//! let cell = picker.cell(GridCoordinate::new(0, 10));
//! if cell.enabled {
//!     picker.tap(cell.coordinate);
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod host;

pub use config::PickerConfig;
pub use domain::models::{CalendarContext, CalendarDate, Component, DateComponents, DateRange, Locale, Zone};
pub use domain::systems::{CalendarIdentifier, CalendarSystem, YearMonthDay};
pub use domain::{GridIndexer, Picker, RangeModel, SelectionState, SetDateOutcome, SubscriptionId, TimeOfDayState};
pub use error::{CalendarError, Result};
pub use host::{Clock, FixedClock, SystemClock};
pub use shared::{
    CalendarCell, CalendarDayType, DisplayMode, FoldState, GridCoordinate, MonthHeader, PickerEvent,
    TimeLabel, ValueChange,
};

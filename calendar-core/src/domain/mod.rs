//! # Domain Module
//!
//! Calendar arithmetic and the state behind a month-grid date/time picker.
//!
//! Nothing here renders anything. The rendering layer asks the domain which
//! date sits in a grid cell, whether it is enabled, today or selected, and
//! forwards taps and wheel changes back as state transitions.
//!
//! ## Module Organization
//!
//! - **systems**: Calendar identifiers and ICU4X-backed calendar arithmetic
//! - **models**: Value types: dates bound to a calendar context, locales, zones, components
//! - **calendar_math**: Truncation, addition, comparison and differences of dates
//! - **grid_indexer**: Date to `(section, item)` mapping and back
//! - **range_model**: Minimum/maximum dates and the grid bounds derived from them
//! - **selection**: Selected date, "today" snapshot and cell invalidation
//! - **time_of_day**: Hour/minute composition, clamping and fold state
//! - **picker**: The component facade tying the above together
//!
//! ## Core Concepts
//!
//! - **Section**: One page of the grid, exactly one calendar month
//! - **Item**: One cell of a section, a day or a leading padding slot
//! - **Padding cell**: A slot before day 1 aligning it under its weekday column
//! - **Granularity**: The unit at which two dates are compared
//!
//! ## Rules
//!
//! - Fields are always read through the date's own calendar, locale and zone
//! - Arithmetic that cannot be represented keeps the original date
//! - Range changes are fully applied before the mutator returns

pub mod calendar_math;
pub mod grid_indexer;
pub mod models;
pub mod picker;
pub mod range_model;
pub mod selection;
pub mod systems;
pub mod time_of_day;

pub use grid_indexer::GridIndexer;
pub use picker::{Picker, SetDateOutcome, SubscriptionId};
pub use range_model::RangeModel;
pub use selection::SelectionState;
pub use time_of_day::TimeOfDayState;

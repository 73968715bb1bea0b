//! Value types shared by the calendar core modules.

pub mod calendar_date;
pub mod components;
pub mod locale;
pub mod zone;

pub use calendar_date::*;
pub use components::*;
pub use locale::*;
pub use zone::*;

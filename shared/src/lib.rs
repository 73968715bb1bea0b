use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in the paginated month grid.
///
/// `section` counts months from the grid's first month, `item` counts cells
/// within that month's page (leading padding cells included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub section: usize,
    pub item: usize,
}

impl GridCoordinate {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.item)
    }
}

/// Whether the time wheel is reachable at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Date,
    #[default]
    DateAndTime,
}

/// Which of the time-entry panels is currently expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldState {
    /// Both panels hidden
    #[default]
    Folded,
    /// Date label visible
    Date,
    /// Date label and hour/minute wheel visible
    Picker,
}

/// Type of grid cell for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Blank slot before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// Everything the rendering layer needs to draw one cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub coordinate: GridCoordinate,
    /// Start of the cell's day (may belong to the previous month for padding cells)
    pub date: DateTime<Utc>,
    /// Day of month under the grid's calendar, 0 for padding cells
    pub day: u32,
    pub day_type: CalendarDayType,
    pub enabled: bool,
    pub today: bool,
    pub selected: bool,
}

impl CalendarCell {
    pub fn is_padding(&self) -> bool {
        self.day_type == CalendarDayType::PaddingBefore
    }
}

/// Header shown above each month page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthHeader {
    pub section: usize,
    pub year: i32,
    pub month: u32,
    pub title: String,
    /// Very short weekday symbols, first entry is the grid's first weekday
    pub weekday_symbols: Vec<String>,
}

/// Text of the collapsible date/time label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeLabel {
    pub date_text: String,
    pub time_text: String,
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_text, self.time_text)
    }
}

/// Reason attached to an intermediate value change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum ValueChange {
    FoldStateChanged(FoldState),
    TimeChanged,
    DragStarted,
}

/// Events delivered to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerEvent {
    /// The user committed a selection
    DateSelected(DateTime<Utc>),
    /// Any intermediate change, for host-side UI sync
    ValueChanged(ValueChange),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_modes() {
        assert_eq!(DisplayMode::default(), DisplayMode::DateAndTime);
        assert_eq!(FoldState::default(), FoldState::Folded);
    }

    #[test]
    fn test_display_mode_serialization() {
        assert_eq!(serde_json::to_string(&DisplayMode::DateAndTime).unwrap(), "\"date_and_time\"");
        let mode: DisplayMode = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(mode, DisplayMode::Date);
    }

    #[test]
    fn test_picker_event_serialization() {
        let event = PickerEvent::ValueChanged(ValueChange::FoldStateChanged(FoldState::Picker));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"value_changed":{"kind":"fold_state_changed","state":"picker"}}"#);

        let selected = PickerEvent::DateSelected(Utc.timestamp_opt(1561284751, 0).unwrap());
        let json = serde_json::to_string(&selected).unwrap();
        assert!(json.contains("2019-06-23T10:12:31Z"));
    }

    #[test]
    fn test_coordinate_ordering_and_display() {
        let a = GridCoordinate::new(0, 30);
        let b = GridCoordinate::new(1, 0);
        assert!(a < b);
        assert_eq!(b.to_string(), "1:0");
    }

    #[test]
    fn test_time_label_display() {
        let label = TimeLabel {
            date_text: "June 23, 2019".to_string(),
            time_text: "10:12".to_string(),
        };
        assert_eq!(label.to_string(), "June 23, 2019 10:12");
    }
}

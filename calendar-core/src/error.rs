//! Error types for the calendar core.
//!
//! Only parsing and configuration surface errors. Runtime grid, selection and
//! arithmetic operations degrade silently instead of returning them.

use crate::domain::systems::CalendarIdentifier;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Unknown calendar identifier: {0}")]
    UnknownCalendar(String),
    #[error("Invalid locale identifier: {0}")]
    InvalidLocale(String),
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Maximum date {maximum} is before minimum date {minimum}")]
    InvertedRange {
        minimum: DateTime<Utc>,
        maximum: DateTime<Utc>,
    },
    #[error("{fields} cannot be represented in the {calendar} calendar")]
    UnrepresentableDate {
        calendar: CalendarIdentifier,
        fields: String,
    },
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML config: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

//! # Picker Configuration
//!
//! Host-supplied configuration for a [`Picker`](crate::domain::picker::Picker),
//! loadable from YAML or JSON.
//!
//! ## YAML Format
//!
//! ```yaml
//! minimum_date: "2019-06-23T10:12:31Z"
//! maximum_date: "2029-06-23T10:12:31Z"
//! calendar: hebrew
//! locale: he_IL
//! time_zone: Asia/Jerusalem
//! display_mode: date_and_time
//! selected_date: "2019-07-01T09:30:00Z"
//! ```
//!
//! Every field is optional. Missing locale and time zone follow the host.

use crate::domain::models::{CalendarContext, DateComponents, Locale, Zone};
use crate::domain::systems::CalendarIdentifier;
use crate::error::{CalendarError, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::DisplayMode;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Earliest selectable instant
    pub minimum_date: DateTime<Utc>,
    /// Latest selectable instant
    pub maximum_date: DateTime<Utc>,
    pub calendar: CalendarIdentifier,
    /// Host preferred locale when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    /// Process local zone when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<Zone>,
    pub display_mode: DisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<DateTime<Utc>>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let now = Utc::now();
        let ten_years = CalendarContext::new(CalendarIdentifier::Gregorian)
            .with_time_zone(Zone::Utc)
            .date(now)
            .adding(&DateComponents::years(10));
        Self {
            minimum_date: now,
            maximum_date: ten_years.instant(),
            calendar: CalendarIdentifier::Gregorian,
            locale: None,
            time_zone: None,
            display_mode: DisplayMode::DateAndTime,
            selected_date: None,
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CalendarError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = if is_json(path) {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!("Loaded picker config from {:?}", path);
        Ok(config)
    }

    /// Write atomically through a temporary file next to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };

        let write_error = |source| CalendarError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(write_error)?;
        if let Err(source) = fs::rename(&temp_path, path) {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!("Failed to remove temporary config file {:?}: {}", temp_path, e);
            }
            return Err(write_error(source));
        }

        info!("Saved picker config to {:?}", path);
        Ok(())
    }

    /// Rejects a maximum date earlier than the minimum date
    pub fn validate(&self) -> Result<()> {
        if self.maximum_date < self.minimum_date {
            return Err(CalendarError::InvertedRange {
                minimum: self.minimum_date,
                maximum: self.maximum_date,
            });
        }
        Ok(())
    }

    pub fn context(&self) -> CalendarContext {
        CalendarContext {
            calendar: self.calendar,
            locale: self.locale.clone(),
            time_zone: self.time_zone,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    const SAMPLE_YAML: &str = r#"
minimum_date: "2019-06-23T10:12:31Z"
maximum_date: "2029-06-23T10:12:31Z"
calendar: hebrew
locale: he_IL
time_zone: "+02:00"
display_mode: date
selected_date: "2019-07-01T09:30:00Z"
"#;

    #[test]
    fn test_default_config() {
        let config = PickerConfig::default();
        assert_eq!(config.calendar, CalendarIdentifier::Gregorian);
        assert_eq!(config.display_mode, DisplayMode::DateAndTime);
        assert!(config.locale.is_none());
        assert!(config.time_zone.is_none());
        assert!(config.maximum_date > config.minimum_date);
        assert!(config.validate().is_ok());

        let years = (config.maximum_date - config.minimum_date).num_days() / 365;
        assert_eq!(years, 10);
    }

    #[test]
    fn test_from_yaml_str() {
        let config = PickerConfig::from_yaml_str(SAMPLE_YAML).unwrap();
        assert_eq!(config.minimum_date, Utc.timestamp_opt(1561284751, 0).unwrap());
        assert_eq!(config.calendar, CalendarIdentifier::Hebrew);
        assert_eq!(config.locale, Some(Locale::parse("he_IL").unwrap()));
        assert_eq!(config.time_zone, Some("+02:00".parse().unwrap()));
        assert_eq!(config.display_mode, DisplayMode::Date);
        assert!(config.selected_date.is_some());

        let context = config.context();
        assert_eq!(context.calendar, CalendarIdentifier::Hebrew);
        assert_eq!(context.first_weekday(), 1);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = PickerConfig::from_json_str(r#"{"calendar": "islamic-civil"}"#).unwrap();
        assert_eq!(config.calendar, CalendarIdentifier::IslamicCivil);
        assert_eq!(config.display_mode, DisplayMode::DateAndTime);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = PickerConfig::from_yaml_str("calendar: mayan");
        assert!(matches!(result, Err(CalendarError::ConfigYaml(_))));

        let result = PickerConfig::from_json_str(r#"{"time_zone": "Mars/Olympus"}"#);
        assert!(matches!(result, Err(CalendarError::ConfigJson(_))));
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut config = PickerConfig::from_yaml_str(SAMPLE_YAML).unwrap();
        std::mem::swap(&mut config.minimum_date, &mut config.maximum_date);
        assert!(matches!(config.validate(), Err(CalendarError::InvertedRange { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = PickerConfig::from_yaml_str(SAMPLE_YAML).unwrap();

        let yaml_path = temp_dir.path().join("picker.yaml");
        config.save(&yaml_path).unwrap();
        assert_eq!(PickerConfig::load(&yaml_path).unwrap(), config);

        let json_path = temp_dir.path().join("picker.json");
        config.save(&json_path).unwrap();
        let content = fs::read_to_string(&json_path).unwrap();
        assert!(content.contains("\"calendar\": \"hebrew\""));
        assert_eq!(PickerConfig::load(&json_path).unwrap(), config);
        assert!(!temp_dir.path().join("picker.tmp").exists());
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = PickerConfig::from_yaml_str(SAMPLE_YAML).unwrap();

        // A non-empty directory cannot be replaced by a file
        let target = temp_dir.path().join("picker.yaml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "").unwrap();

        let result = config.save(&target);
        assert!(matches!(result, Err(CalendarError::ConfigWrite { .. })));
        assert!(!temp_dir.path().join("picker.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_named_time_zone_in_config() {
        let config = PickerConfig::from_yaml_str("time_zone: Asia/Jerusalem").unwrap();
        assert_eq!(config.time_zone, Some("Asia/Jerusalem".parse().unwrap()));
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("time_zone: Asia/Jerusalem"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = PickerConfig::load(temp_dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(CalendarError::ConfigRead { .. })));
    }
}

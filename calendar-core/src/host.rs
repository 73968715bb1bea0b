//! Host environment lookups: preferred locale and the current instant.
//!
//! Nothing here is cached. Callers resolve the locale and "now" at the point
//! of use so a change in the host environment is picked up by the next query.

use crate::domain::models::Locale;
use chrono::{DateTime, Utc};

/// Environment variables consulted for the preferred locale, in priority order
const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// The host's preferred locale, `en-US` when none is configured
pub fn preferred_locale() -> Locale {
    for variable in LOCALE_VARIABLES {
        let Ok(value) = std::env::var(variable) else {
            continue;
        };
        if let Some(locale) = locale_from_env_value(&value) {
            return locale;
        }
    }
    Locale::default()
}

fn locale_from_env_value(value: &str) -> Option<Locale> {
    let value = value.trim();
    let base = value.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    match Locale::parse(base) {
        Ok(locale) => Some(locale),
        Err(e) => {
            log::warn!("⚠️ Ignoring host locale {:?}: {}", value, e);
            None
        }
    }
}

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

//! Domain model for a locale identifier and the week data derived from it.
//!
//! Parsing and week data come from ICU4X. A locale without a region is
//! expanded with its likely subtags first, so `he` gets Israel's week.
use crate::error::CalendarError;
use icu::calendar::types::Weekday;
use icu::calendar::week::WeekInformation;
use icu::locale::{locale, LocaleExpander};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A BCP-47 locale; POSIX forms like `he_IL.UTF-8` are accepted too
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    inner: icu::locale::Locale,
}

impl Locale {
    /// Parse identifiers like `en_US`, `fr-FR`, `he_IL.UTF-8`, `zh_Hant_TW` or `de`
    pub fn parse(identifier: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidLocale(identifier.to_string());

        let base = identifier
            .split(['.', '@'])
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .replace('_', "-");
        if base.is_empty() {
            return Err(invalid());
        }

        let inner = base.parse::<icu::locale::Locale>().map_err(|_| invalid())?;
        Ok(Self { inner })
    }

    pub fn language(&self) -> &str {
        self.inner.id.language.as_str()
    }

    pub fn region(&self) -> Option<&str> {
        self.inner.id.region.as_ref().map(|region| region.as_str())
    }

    /// Canonical BCP-47 form, e.g. `en-US`
    pub fn identifier(&self) -> String {
        self.inner.to_string()
    }

    /// First day of the week, 1 = Sunday ... 7 = Saturday
    pub fn first_weekday(&self) -> u32 {
        let mut expanded = self.inner.clone();
        LocaleExpander::new_common().maximize(&mut expanded.id);

        match WeekInformation::try_new(expanded.into()) {
            Ok(week) => weekday_number(week.first_weekday),
            Err(e) => {
                log::warn!("⚠️ No week data for {}, starting weeks on Monday: {}", self, e);
                2
            }
        }
    }
}

fn weekday_number(weekday: Weekday) -> u32 {
    match weekday {
        Weekday::Sunday => 1,
        Weekday::Monday => 2,
        Weekday::Tuesday => 3,
        Weekday::Wednesday => 4,
        Weekday::Thursday => 5,
        Weekday::Friday => 6,
        Weekday::Saturday => 7,
        #[allow(unreachable_patterns)]
        _ => 2,
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            inner: locale!("en-US"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl FromStr for Locale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.identifier()
    }
}

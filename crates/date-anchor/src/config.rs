//! Engine defaults.
//!
//! [`EngineConfig`] is a source of defaults only. Every entry point that
//! takes a timezone, duration, or locale also accepts an explicit override,
//! and explicit values always win. There is no process-wide mutable state.

use chrono::Locale;
use serde::Deserialize;

use crate::error::{DateError, Result};

/// Configured defaults for the date engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// IANA timezone used when a request carries none.
    pub default_timezone: String,
    /// Event duration in minutes used when a request carries none.
    pub default_duration_minutes: u32,
    /// Domain suffix appended to generated event UIDs.
    pub uid_domain: String,
    /// Locale identifier for display formatting (e.g. `"en_US"`, `"fi_FI"`).
    pub display_locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timezone: "Europe/Helsinki".to_string(),
            default_duration_minutes: 60,
            uid_domain: "date-anchor.local".to_string(),
            display_locale: "en_US".to_string(),
        }
    }
}

impl EngineConfig {
    /// The configured display locale.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidLocale`] if the identifier is not a
    /// known locale name.
    pub fn locale(&self) -> Result<Locale> {
        Locale::try_from(self.display_locale.as_str())
            .map_err(|_| DateError::InvalidLocale(self.display_locale.clone()))
    }
}

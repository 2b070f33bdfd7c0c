//! Configuration structures
//!
//! Timezone and locale are explicit configuration rather than ambient
//! process state, so slot derivation and localized lookups stay
//! deterministic and testable.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};

/// Top-level configuration for the booking engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub booking: BookingConfig,
}

/// HTTP API adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the public API (e.g. "https://api.salonkit.app/v1")
    pub base_url: String,
    /// Slug identifying the company whose catalog is being booked
    pub company_slug: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            company_slug: String::new(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Viewer-facing configuration for the wizard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Timezone slots are rendered in and picked times are interpreted in
    pub timezone: Tz,
    /// Display locale for localized service and category names (e.g. "en")
    pub locale: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { timezone: chrono_tz::UTC, locale: "en".to_string() }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

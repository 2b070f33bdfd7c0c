//! Domain constants
//!
//! Centralized location for domain-level constants used throughout the
//! booking engine.

// Slot derivation
pub const SLOT_INTERVAL_MINUTES: u32 = 15;

// Wire formats accepted for availability range endpoints
pub const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";
pub const TIME_FORMAT_MINUTES: &str = "%H:%M";

// Calendar date format used by the public API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Separator for flattened category paths in search results
pub const CATEGORY_PATH_SEPARATOR: &str = " > ";

// HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_BASE_URL: &str = "https://api.salonkit.app/v1";

//! Configuration loader
//!
//! Loads engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SALONKIT_API_BASE_URL`: Base URL of the public API
//! - `SALONKIT_COMPANY_SLUG`: Company slug to book against
//! - `SALONKIT_HTTP_TIMEOUT_SECS`: Request timeout in seconds (optional)
//! - `SALONKIT_TIMEZONE`: Viewer timezone, IANA name (e.g. "Europe/Zurich")
//! - `SALONKIT_LOCALE`: Display locale tag (e.g. "en")

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use salonkit_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use salonkit_domain::{ApiConfig, BookingConfig, Config, Result, SalonKitError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SalonKitError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SalonKitError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("SALONKIT_API_BASE_URL")?;
    let company_slug = env_var("SALONKIT_COMPANY_SLUG")?;
    let timeout_secs = match std::env::var("SALONKIT_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| SalonKitError::Config(format!("Invalid timeout: {e}")))?,
        Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    let timezone = env_var("SALONKIT_TIMEZONE").and_then(|raw| {
        Tz::from_str(&raw)
            .map_err(|_| SalonKitError::Config(format!("Unknown timezone: {raw}")))
    })?;
    let locale = env_var("SALONKIT_LOCALE")?;

    Ok(Config {
        api: ApiConfig { base_url, company_slug, timeout_secs },
        booking: BookingConfig { timezone, locale },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SalonKitError::Config` if no file is found or it cannot be
/// parsed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SalonKitError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SalonKitError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SalonKitError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SalonKitError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SalonKitError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SalonKitError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe standard locations for configuration files
///
/// Searches the current working directory and up to two parent levels for
/// `config.{json,toml}` and `salonkit.{json,toml}`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.extend([
                dir.join("config.json"),
                dir.join("config.toml"),
                dir.join("salonkit.json"),
                dir.join("salonkit.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SalonKitError::Config(format!("Missing required environment variable: {key}"))
    })
}

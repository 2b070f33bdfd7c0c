//! Display-language preference store
//!
//! The only client state that survives a restart: the user-chosen display
//! language, kept as an opaque value in a small file next to the config.

use std::path::PathBuf;

use salonkit_domain::{Result, SalonKitError};
use tracing::debug;

pub struct LanguagePreferenceStore {
    path: PathBuf,
}

impl LanguagePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored preference, or `None` when nothing was ever saved
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let value = raw.trim().to_string();
                if value.is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "No stored language preference");
                None
            }
        }
    }

    pub fn save(&self, language: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SalonKitError::Internal(format!("Failed to create preference directory: {e}"))
            })?;
        }
        std::fs::write(&self.path, language).map_err(|e| {
            SalonKitError::Internal(format!("Failed to store language preference: {e}"))
        })
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(SalonKitError::Internal(format!("Failed to clear language preference: {err}")))
            }
        }
    }
}

//! Staff roster types

use serde::{Deserialize, Serialize};

/// Server-assigned staff identifier
pub type StaffId = String;

/// A staff member offered for booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Comma-separated language tags (e.g. "en,de")
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl Staff {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Parsed language tags, trimmed and with empty entries dropped.
    pub fn language_tags(&self) -> Vec<&str> {
        self.languages
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

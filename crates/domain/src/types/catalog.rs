//! Catalog types: categories and the services they offer
//!
//! Categories form an acyclic tree. Each category owns its subcategories
//! outright; the optional `parent_id` is an id-only back-pointer used for
//! display purposes and never for traversal.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Server-assigned category identifier
pub type CategoryId = String;

/// Server-assigned service identifier
pub type ServiceId = String;

/// A bookable service offered by the salon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    /// Base display name, used when no locale variant matches
    pub name: String,
    /// Per-locale name variants keyed by locale tag (e.g. "de", "fr")
    #[serde(default)]
    pub name_translations: HashMap<String, String>,
    pub duration_minutes: u32,
    pub price_cents: i64,
    #[serde(default)]
    pub discount_price_cents: Option<i64>,
    /// Owning category, assigned during catalog ingestion
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Staff members allowed to perform this service
    #[serde(default)]
    pub assigned_staff_ids: BTreeSet<String>,
}

impl Service {
    /// Locale-specific name if present and non-empty, else the base name.
    /// Always succeeds; a missing locale is not an error.
    pub fn localized_name(&self, locale: &str) -> &str {
        match self.name_translations.get(locale) {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    /// Every name field a text search should consider: the base name plus
    /// all locale variants.
    pub fn searchable_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.name_translations.values().map(String::as_str))
    }
}

/// A node in the category tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub name_translations: HashMap<String, String>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub subcategories: Vec<Category>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Locale-specific name if present and non-empty, else the base name.
    pub fn localized_name(&self, locale: &str) -> &str {
        match self.name_translations.get(locale) {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}

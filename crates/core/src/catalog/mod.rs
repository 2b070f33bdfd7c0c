//! Hierarchical service catalog
//!
//! The catalog is an acyclic tree of categories owning services and
//! subcategories. A category is visible iff it or any descendant carries at
//! least one service. Search is a recursive, case-insensitive substring
//! match over every localized service name.

mod search;

use std::collections::HashMap;

use salonkit_domain::{Category, Service, ServiceId};

pub use self::search::SearchHit;

/// Read-only catalog snapshot, fetched once per company context
#[derive(Debug, Clone)]
pub struct CatalogTree {
    categories: Vec<Category>,
    services_by_id: HashMap<ServiceId, Service>,
    locale: String,
}

impl CatalogTree {
    /// Ingest a fetched category tree.
    ///
    /// Assigns `category_id` to every service and builds the flat service
    /// index used for selection lookups.
    pub fn new(mut categories: Vec<Category>, locale: impl Into<String>) -> Self {
        let mut services_by_id = HashMap::new();
        for category in &mut categories {
            assign_ownership(category, &mut services_by_id);
        }
        Self { categories, services_by_id, locale: locale.into() }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// All top-level categories, visible or not
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a service by id across the whole tree
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services_by_id.get(id)
    }

    /// Resolve a set of selected ids to services, skipping unknown ids
    pub fn services_for<'a, I>(&self, ids: I) -> Vec<&Service>
    where
        I: IntoIterator<Item = &'a ServiceId>,
    {
        ids.into_iter().filter_map(|id| self.service(id)).collect()
    }

    /// True if the category or any descendant offers at least one service
    pub fn has_services(category: &Category) -> bool {
        !category.services.is_empty()
            || category.subcategories.iter().any(Self::has_services)
    }

    /// Top-level categories eligible for display.
    ///
    /// Only display eligibility is filtered here; empty subcategories stay
    /// in the returned categories' data untouched.
    pub fn visible_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| Self::has_services(c)).collect()
    }
}

fn assign_ownership(category: &mut Category, index: &mut HashMap<ServiceId, Service>) {
    for service in &mut category.services {
        service.category_id = Some(category.id.clone());
        index.insert(service.id.clone(), service.clone());
    }
    for sub in &mut category.subcategories {
        sub.parent_id = Some(category.id.clone());
        assign_ownership(sub, index);
    }
}

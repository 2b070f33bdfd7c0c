//! Recursive multilingual catalog search
//!
//! Two views share one matching rule (case-insensitive substring over every
//! localized service name): a pruned tree for the nested category view and
//! a flat, depth-first hit list for the search dropdown.

use salonkit_domain::constants::CATEGORY_PATH_SEPARATOR;
use salonkit_domain::{Category, Service};

use super::CatalogTree;

/// One flat search result: a matching service plus its human-readable
/// ancestor path (e.g. "Hair > Cuts")
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub service: &'a Service,
    pub category_path: String,
}

impl CatalogTree {
    /// Prune the tree to services matching `query`.
    ///
    /// A category survives only with at least one surviving service or
    /// subcategory. A blank query is equivalent to [`visible_categories`].
    ///
    /// [`visible_categories`]: CatalogTree::visible_categories
    pub fn filter_by_search(&self, query: &str) -> Vec<Category> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.visible_categories().into_iter().cloned().collect();
        }
        self.categories()
            .iter()
            .filter_map(|category| filter_category(category, &needle))
            .collect()
    }

    /// Depth-first flat view of matching services for the search dropdown.
    ///
    /// Produces exactly the leaf services of [`filter_by_search`] for the
    /// same query, each paired with its `" > "`-joined category path.
    ///
    /// [`filter_by_search`]: CatalogTree::filter_by_search
    pub fn flatten_search_results(&self, query: &str) -> Vec<SearchHit<'_>> {
        let needle = query.trim().to_lowercase();
        let mut hits = Vec::new();
        let mut path = Vec::new();
        for category in self.categories() {
            flatten_category(category, &needle, self.locale(), &mut path, &mut hits);
        }
        hits
    }
}

fn service_matches(service: &Service, needle: &str) -> bool {
    service.searchable_names().any(|name| name.to_lowercase().contains(needle))
}

fn filter_category(category: &Category, needle: &str) -> Option<Category> {
    let services: Vec<Service> =
        category.services.iter().filter(|s| service_matches(s, needle)).cloned().collect();
    let subcategories: Vec<Category> =
        category.subcategories.iter().filter_map(|sub| filter_category(sub, needle)).collect();

    if services.is_empty() && subcategories.is_empty() {
        return None;
    }
    Some(Category { services, subcategories, ..category.clone() })
}

fn flatten_category<'a>(
    category: &'a Category,
    needle: &str,
    locale: &str,
    path: &mut Vec<String>,
    hits: &mut Vec<SearchHit<'a>>,
) {
    path.push(category.localized_name(locale).to_string());
    for service in &category.services {
        if service_matches(service, needle) {
            hits.push(SearchHit {
                service,
                category_path: path.join(CATEGORY_PATH_SEPARATOR),
            });
        }
    }
    for sub in &category.subcategories {
        flatten_category(sub, needle, locale, path, hits);
    }
    path.pop();
}

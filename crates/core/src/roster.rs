//! Staff roster and eligibility filtering
//!
//! Only staff assigned to at least one currently selected service are
//! offered. Eligibility is the union over the selected services'
//! assignments; an empty selection offers nobody.

use salonkit_domain::{Service, Staff};

/// Read-only staff snapshot, fetched once per company context
#[derive(Debug, Clone, Default)]
pub struct StaffRoster {
    staff: Vec<Staff>,
}

impl StaffRoster {
    pub fn new(staff: Vec<Staff>) -> Self {
        Self { staff }
    }

    pub fn all(&self) -> &[Staff] {
        &self.staff
    }

    pub fn by_id(&self, id: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// Staff eligible for the given service selection, in roster order.
    ///
    /// A member qualifies when any selected service lists them in its
    /// assignments. No services selected means no staff shown.
    pub fn eligible_staff(&self, selected_services: &[&Service]) -> Vec<&Staff> {
        if selected_services.is_empty() {
            return Vec::new();
        }
        self.staff
            .iter()
            .filter(|member| {
                selected_services
                    .iter()
                    .any(|service| service.assigned_staff_ids.contains(&member.id))
            })
            .collect()
    }

    /// Substring search over first name, last name, and position.
    /// An empty query is the identity.
    pub fn filter_by_search<'a>(list: &[&'a Staff], query: &str) -> Vec<&'a Staff> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return list.to_vec();
        }
        list.iter()
            .copied()
            .filter(|member| {
                member.first_name.to_lowercase().contains(&needle)
                    || member.last_name.to_lowercase().contains(&needle)
                    || member
                        .position
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

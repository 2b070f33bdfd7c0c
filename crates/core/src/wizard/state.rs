//! Wizard session state
//!
//! Created at wizard mount with step 1 and empty selections, mutated only
//! through the wizard's transition operations, and gone when the session
//! ends. Nothing here is persisted.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use salonkit_domain::{CustomerInfo, ServiceId, StaffId};
use serde::{Deserialize, Serialize};

/// The four ordered wizard stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Services,
    Professional,
    DateTime,
    Details,
}

impl Step {
    /// 1-based step number as shown to the user
    pub fn number(self) -> u8 {
        match self {
            Self::Services => 1,
            Self::Professional => 2,
            Self::DateTime => 3,
            Self::Details => 4,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Services => Some(Self::Professional),
            Self::Professional => Some(Self::DateTime),
            Self::DateTime => Some(Self::Details),
            Self::Details => None,
        }
    }
}

/// Full selection state of one wizard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWizardState {
    pub step: Step,
    pub selected_service_ids: BTreeSet<ServiceId>,
    pub selected_staff_id: Option<StaffId>,
    pub selected_date: Option<NaiveDate>,
    /// Picked local time of day, "HH:MM"
    pub selected_time: Option<String>,
    pub customer: CustomerInfo,
    pub terms_agreed: bool,
    /// Set once submission succeeded; the wizard is then in its terminal
    /// Submitted state
    pub booking_id: Option<String>,
}

impl Default for BookingWizardState {
    fn default() -> Self {
        Self {
            step: Step::Services,
            selected_service_ids: BTreeSet::new(),
            selected_staff_id: None,
            selected_date: None,
            selected_time: None,
            customer: CustomerInfo::default(),
            terms_agreed: false,
            booking_id: None,
        }
    }
}

impl BookingWizardState {
    pub fn is_submitted(&self) -> bool {
        self.booking_id.is_some()
    }
}

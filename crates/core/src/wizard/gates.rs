//! Table-driven step gating
//!
//! One rule per step instead of scattered conditionals, so each gate is a
//! pure predicate over the state and independently testable. Reset side
//! effects (clearing the picked time when staff or date change) live on the
//! wizard's mutating operations, not here.

use super::state::{BookingWizardState, Step};

/// Forward gate for one wizard step
pub(crate) struct StepRule {
    pub step: Step,
    pub can_advance: fn(&BookingWizardState) -> bool,
    /// Validation message surfaced when the gate blocks
    pub blocked_reason: &'static str,
}

pub(crate) const STEP_RULES: [StepRule; 4] = [
    StepRule {
        step: Step::Services,
        can_advance: |state| !state.selected_service_ids.is_empty(),
        blocked_reason: "Select at least one service to continue",
    },
    StepRule {
        step: Step::Professional,
        can_advance: |state| state.selected_staff_id.is_some(),
        blocked_reason: "Select a professional to continue",
    },
    StepRule {
        step: Step::DateTime,
        can_advance: |state| state.selected_date.is_some() && state.selected_time.is_some(),
        blocked_reason: "Select a date and time to continue",
    },
    StepRule {
        step: Step::Details,
        can_advance: |state| state.terms_agreed,
        blocked_reason: "You must agree to the terms and conditions",
    },
];

pub(crate) fn rule_for(step: Step) -> &'static StepRule {
    // The table covers every step, in order
    &STEP_RULES[step.number() as usize - 1]
}

//! Booking wizard state machine
//!
//! Owns step progression, gating, cross-field resets, and submission. The
//! wizard is the single writer of its session state; catalog and roster are
//! read-only snapshots fetched once at load.

mod gates;
mod state;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use salonkit_domain::constants::TIME_FORMAT_MINUTES;
use salonkit_domain::{
    BookingConfig, BookingConfirmation, BookingItem, BookingRequest, Company, CustomerInfo,
    CustomerPayload, Result, SalonKitError, Service, Staff, TimeSlot,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::availability::slots::SlotPolicy;
use crate::availability::{first_of_month, AvailabilityEngine, FetchKey};
use crate::catalog::CatalogTree;
use crate::ports::BookingApi;
use crate::pricing;
use crate::roster::StaffRoster;

use self::gates::rule_for;
pub use self::state::{BookingWizardState, Step};

/// One customer booking session
pub struct BookingWizard {
    api: Arc<dyn BookingApi>,
    config: BookingConfig,
    company_slug: String,
    company: Company,
    catalog: CatalogTree,
    roster: StaffRoster,
    availability: AvailabilityEngine,
    displayed_month: NaiveDate,
    idempotency_key: Option<Uuid>,
    state: BookingWizardState,
}

impl BookingWizard {
    /// Load the company context and mount a fresh wizard at step 1.
    ///
    /// Any fetch failure here blocks the wizard; callers surface it as a
    /// retryable error state and may simply call `load` again.
    pub async fn load(
        api: Arc<dyn BookingApi>,
        config: BookingConfig,
        company_slug: impl Into<String>,
    ) -> Result<Self> {
        let company_slug = company_slug.into();
        let company = api.fetch_company(&company_slug).await?;
        let categories = api.fetch_catalog(&company_slug).await?;
        let staff = api.fetch_staff(&company_slug).await?;

        let catalog = CatalogTree::new(categories, config.locale.clone());
        let roster = StaffRoster::new(staff);
        let availability =
            AvailabilityEngine::new(Arc::clone(&api), company_slug.clone(), config.timezone);
        let displayed_month =
            first_of_month(Utc::now().with_timezone(&config.timezone).date_naive());

        Ok(Self {
            api,
            config,
            company_slug,
            company,
            catalog,
            roster,
            availability,
            displayed_month,
            idempotency_key: None,
            state: BookingWizardState::default(),
        })
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn catalog(&self) -> &CatalogTree {
        &self.catalog
    }

    pub fn roster(&self) -> &StaffRoster {
        &self.roster
    }

    pub fn state(&self) -> &BookingWizardState {
        &self.state
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected_services(&self) -> Vec<&Service> {
        self.catalog.services_for(&self.state.selected_service_ids)
    }

    /// Staff offered for the current service selection, in roster order
    pub fn eligible_staff(&self) -> Vec<&Staff> {
        self.roster.eligible_staff(&self.selected_services())
    }

    /// Aggregate price of the selection in display currency units
    pub fn total_price(&self) -> f64 {
        pricing::total_price(&self.selected_services())
    }

    /// Aggregate duration of the selection in minutes
    pub fn total_duration_minutes(&self) -> u32 {
        pricing::total_duration_minutes(&self.selected_services())
    }

    /// Toggle a service in or out of the selection.
    ///
    /// Staff, date, and time selections are intentionally left alone; the
    /// eligibility filter downstream may silently stop offering a
    /// previously chosen staff member. While the date/time step is showing,
    /// the change starts a new availability cycle and drops the picked
    /// time.
    pub async fn toggle_service(&mut self, service_id: &str) -> Result<()> {
        if self.catalog.service(service_id).is_none() {
            return Err(SalonKitError::NotFound(format!("Unknown service: {service_id}")));
        }
        if !self.state.selected_service_ids.remove(service_id) {
            self.state.selected_service_ids.insert(service_id.to_string());
        }
        if self.state.step == Step::DateTime {
            self.state.selected_time = None;
            self.refresh_availability().await?;
        }
        Ok(())
    }

    /// Choose a staff member from the eligible roster. Clears any picked
    /// time; while on the date/time step this also starts a new
    /// availability cycle.
    pub async fn select_staff(&mut self, staff_id: &str) -> Result<()> {
        if !self.eligible_staff().iter().any(|s| s.id == staff_id) {
            return Err(SalonKitError::InvalidInput(format!(
                "Staff {staff_id} is not eligible for the current selection"
            )));
        }
        self.state.selected_staff_id = Some(staff_id.to_string());
        self.state.selected_time = None;
        if self.state.step == Step::DateTime {
            self.refresh_availability().await?;
        }
        Ok(())
    }

    /// Change the displayed month; fetches the new month while the
    /// date/time step is showing
    pub async fn set_displayed_month(&mut self, month: NaiveDate) -> Result<()> {
        let month = first_of_month(month);
        if month == self.displayed_month {
            return Ok(());
        }
        self.displayed_month = month;
        if self.state.step == Step::DateTime {
            self.refresh_availability().await?;
        }
        Ok(())
    }

    /// Pick a date. Clears the picked time and re-derives slots from the
    /// cached month; no network call happens here.
    pub fn select_date(&mut self, date: NaiveDate) -> Vec<TimeSlot> {
        self.state.selected_date = Some(date);
        self.state.selected_time = None;
        self.availability.slots_for(date, self.slot_policy())
    }

    /// Slots for the currently selected date, from cache
    pub fn slots_for_selected_date(&self) -> Vec<TimeSlot> {
        match self.state.selected_date {
            Some(date) => self.availability.slots_for(date, self.slot_policy()),
            None => Vec::new(),
        }
    }

    /// Whether a calendar day should render as bookable
    pub fn has_available_slots(&self, date: NaiveDate) -> bool {
        self.availability.has_available_slots(date)
    }

    pub fn select_time(&mut self, time: impl Into<String>) -> Result<()> {
        if self.state.selected_date.is_none() {
            return Err(SalonKitError::InvalidInput("Select a date first".into()));
        }
        self.state.selected_time = Some(time.into());
        Ok(())
    }

    pub fn set_customer_info(&mut self, customer: CustomerInfo) {
        self.state.customer = customer;
    }

    pub fn set_terms_agreed(&mut self, agreed: bool) {
        self.state.terms_agreed = agreed;
    }

    /// Whether the current step's forward gate is open. Pure; calling it
    /// repeatedly on the same state always answers the same.
    pub fn can_advance(&self) -> bool {
        (rule_for(self.state.step).can_advance)(&self.state)
    }

    /// Move forward one step, enforcing the current step's gate. Entering
    /// the date/time step starts the availability cycle.
    pub async fn advance(&mut self) -> Result<Step> {
        let rule = rule_for(self.state.step);
        if !(rule.can_advance)(&self.state) {
            return Err(SalonKitError::InvalidInput(rule.blocked_reason.to_string()));
        }
        let next = self
            .state
            .step
            .next()
            .ok_or_else(|| SalonKitError::InvalidInput("Already at the final step".into()))?;

        debug!(from = self.state.step.number(), to = next.number(), "Advancing wizard step");
        self.state.step = next;
        if next == Step::DateTime {
            self.refresh_availability().await?;
        }
        Ok(next)
    }

    /// Navigate to an earlier (or the current) step; never validated
    pub fn go_back(&mut self, step: Step) -> Result<()> {
        if step > self.state.step {
            return Err(SalonKitError::InvalidInput(
                "Forward navigation goes through advance()".into(),
            ));
        }
        self.state.step = step;
        Ok(())
    }

    /// Submit the booking.
    ///
    /// Gating and customer validation run locally before any network call.
    /// On success the wizard reaches its terminal Submitted state; on
    /// failure the server message is surfaced, nothing is cleared, and the
    /// user may retry from step 4.
    pub async fn submit(&mut self) -> Result<BookingConfirmation> {
        if self.state.is_submitted() {
            return Err(SalonKitError::InvalidInput("Booking was already submitted".into()));
        }
        if self.state.step != Step::Details {
            return Err(SalonKitError::InvalidInput("Complete the earlier steps first".into()));
        }
        let rule = rule_for(Step::Details);
        if !(rule.can_advance)(&self.state) {
            return Err(SalonKitError::InvalidInput(rule.blocked_reason.to_string()));
        }
        validate_customer(&self.state.customer)?;

        let request = self.build_request()?;
        let confirmation = self.api.create_booking(&self.company_slug, &request).await?;

        info!(booking_id = %confirmation.id, "Booking created");
        self.state.booking_id = Some(confirmation.id.clone());
        Ok(confirmation)
    }

    /// Assemble the submission payload from the current state
    pub fn build_request(&mut self) -> Result<BookingRequest> {
        let date = self
            .state
            .selected_date
            .ok_or_else(|| SalonKitError::InvalidInput("No date selected".into()))?;
        let time = self
            .state
            .selected_time
            .as_deref()
            .ok_or_else(|| SalonKitError::InvalidInput("No time selected".into()))?;
        let staff_id = self
            .state
            .selected_staff_id
            .clone()
            .ok_or_else(|| SalonKitError::InvalidInput("No staff selected".into()))?;

        let starts_at = local_to_instant(date, time, self.config.timezone)?;
        let items = self
            .state
            .selected_service_ids
            .iter()
            .map(|service_id| BookingItem {
                service_id: service_id.clone(),
                staff_id: staff_id.clone(),
            })
            .collect();

        // One key per session so a retried submission is recognized
        let idempotency_key = *self.idempotency_key.get_or_insert_with(Uuid::now_v7);

        Ok(BookingRequest {
            starts_at,
            items,
            customer: CustomerPayload::from(&self.state.customer),
            idempotency_key,
        })
    }

    async fn refresh_availability(&mut self) -> Result<()> {
        let Some(staff_id) = self.state.selected_staff_id.clone() else {
            return Ok(());
        };
        let service_ids: Vec<String> =
            self.state.selected_service_ids.iter().cloned().collect();
        let key = FetchKey::new(staff_id, service_ids, self.displayed_month);
        if self.availability.current_key() == Some(&key) {
            return Ok(());
        }
        self.availability.refresh(key).await
    }

    fn slot_policy(&self) -> SlotPolicy {
        // Duration-unaware offering matches the shipped behavior; strict
        // filtering stays available through derive_slots directly.
        SlotPolicy::Permissive
    }
}

/// Interpret a picked local wall-clock date and time in `tz` and convert to
/// an absolute UTC instant
fn local_to_instant(
    date: NaiveDate,
    time: &str,
    tz: chrono_tz::Tz,
) -> Result<chrono::DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT_MINUTES)
        .map_err(|e| SalonKitError::InvalidInput(format!("Invalid time {time:?}: {e}")))?;
    let naive = NaiveDateTime::new(date, time);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            SalonKitError::InvalidInput(format!("Local time {naive} does not exist in {tz}"))
        })
}

/// Local checks on the contact block, run before any network call
fn validate_customer(customer: &CustomerInfo) -> Result<()> {
    if customer.first_name.trim().is_empty() {
        return Err(SalonKitError::InvalidInput("First name is required".into()));
    }
    if customer.last_name.trim().is_empty() {
        return Err(SalonKitError::InvalidInput("Last name is required".into()));
    }
    let email = customer.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(SalonKitError::InvalidInput("A valid email address is required".into()));
    }
    if customer.phone.trim().is_empty() {
        return Err(SalonKitError::InvalidInput("Phone number is required".into()));
    }
    Ok(())
}

//! Availability engine
//!
//! Owns one fetch cycle per (staff, service selection, displayed month)
//! triple and the resulting month cache. Selecting a date only re-derives
//! slots from the cache; changing staff, services, or month starts a new
//! cycle. Because fetches cannot be cancelled, every cycle carries a
//! generation token and a response is applied only while its generation is
//! still the latest, so a stale response never overwrites newer inputs.

pub mod slots;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use salonkit_domain::{AvailabilityData, DayAvailability, Result, ServiceId, StaffId, TimeSlot};
use tracing::{debug, warn};

use self::slots::{derive_slots, SlotPolicy};
use crate::ports::BookingApi;

/// Identity of one fetch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub staff_id: StaffId,
    /// Selected service ids in canonical (sorted) order
    pub service_ids: Vec<ServiceId>,
    /// First day of the displayed month
    pub month: NaiveDate,
}

impl FetchKey {
    pub fn new(staff_id: impl Into<StaffId>, mut service_ids: Vec<ServiceId>, month: NaiveDate) -> Self {
        service_ids.sort();
        Self { staff_id: staff_id.into(), service_ids, month: first_of_month(month) }
    }
}

/// Handle tying an in-flight fetch to the generation it was issued under
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    key: FetchKey,
}

/// Per-session availability state
pub struct AvailabilityEngine {
    api: Arc<dyn BookingApi>,
    company_slug: String,
    timezone: Tz,
    generation: u64,
    current: Option<FetchKey>,
    days: HashMap<NaiveDate, DayAvailability>,
}

impl AvailabilityEngine {
    pub fn new(api: Arc<dyn BookingApi>, company_slug: impl Into<String>, timezone: Tz) -> Self {
        Self {
            api,
            company_slug: company_slug.into(),
            timezone,
            generation: 0,
            current: None,
            days: HashMap::new(),
        }
    }

    /// The key of the cycle whose data is currently cached, if any
    pub fn current_key(&self) -> Option<&FetchKey> {
        self.current.as_ref()
    }

    /// Start a new fetch cycle, invalidating all earlier tickets
    pub fn begin_fetch(&mut self, key: FetchKey) -> FetchTicket {
        self.generation += 1;
        debug!(
            staff_id = %key.staff_id,
            month = %key.month,
            generation = self.generation,
            "Issuing availability fetch"
        );
        FetchTicket { generation: self.generation, key }
    }

    /// Apply a fetch response. Returns false (and changes nothing) when a
    /// newer cycle has started since the ticket was issued.
    pub fn apply(&mut self, ticket: FetchTicket, data: AvailabilityData) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale availability response"
            );
            return false;
        }
        self.days = flatten(data).into_iter().map(|day| (day.date, day)).collect();
        self.current = Some(ticket.key);
        true
    }

    /// Run one full fetch cycle for `key`.
    ///
    /// A transport failure is non-fatal: the month is treated as having no
    /// availability and the error is only logged. A failed cycle is never
    /// recorded as current, so the next cycle for the same key fetches
    /// again instead of reusing the empty month.
    pub async fn refresh(&mut self, key: FetchKey) -> Result<()> {
        let ticket = self.begin_fetch(key.clone());
        match self
            .api
            .fetch_availability(&self.company_slug, &key.staff_id, key.month, &key.service_ids)
            .await
        {
            Ok(data) => {
                self.apply(ticket, data);
            }
            Err(err) => {
                warn!(error = %err, month = %key.month, "Availability fetch failed, treating month as empty");
                if self.apply(ticket, AvailabilityData::empty()) {
                    self.current = None;
                }
            }
        }
        Ok(())
    }

    /// Drop the cache, e.g. when leaving the date/time step
    pub fn clear(&mut self) {
        self.current = None;
        self.days.clear();
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayAvailability> {
        self.days.get(&date)
    }

    /// True iff the day's record exists with at least one available range.
    /// Independent of whether slots can actually be derived; a day whose
    /// available ranges are all zero-width still counts.
    pub fn has_available_slots(&self, date: NaiveDate) -> bool {
        self.days
            .get(&date)
            .is_some_and(|day| day.time_ranges.iter().any(|r| r.is_available))
    }

    /// Derive slots for a date from the cached month. No network involved.
    pub fn slots_for(&self, date: NaiveDate, policy: SlotPolicy) -> Vec<TimeSlot> {
        match self.days.get(&date) {
            Some(day) => derive_slots(date, &day.time_ranges, self.timezone, policy),
            None => Vec::new(),
        }
    }
}

/// Flatten a monthly payload to one flat list of day records, whether the
/// endpoint returned it flat or nested by week
pub fn flatten(data: AvailabilityData) -> Vec<DayAvailability> {
    match data {
        AvailabilityData::Days(days) => days,
        AvailabilityData::Weeks(weeks) => {
            weeks.into_iter().flat_map(|week| week.days).collect()
        }
    }
}

/// First day of the month `date` falls in
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use salonkit_domain::{
        BookingConfirmation, BookingRequest, Category, Company, SalonKitError, Staff, TimeRange,
        WeekAvailability,
    };

    use super::*;

    struct FixedAvailabilityApi {
        response: std::result::Result<AvailabilityData, SalonKitError>,
    }

    #[async_trait]
    impl BookingApi for FixedAvailabilityApi {
        async fn fetch_company(&self, _slug: &str) -> Result<Company> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_catalog(&self, _slug: &str) -> Result<Vec<Category>> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_staff(&self, _slug: &str) -> Result<Vec<Staff>> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_availability(
            &self,
            _slug: &str,
            _staff_id: &str,
            _date_from: NaiveDate,
            _service_ids: &[String],
        ) -> Result<AvailabilityData> {
            self.response.clone()
        }
        async fn create_booking(
            &self,
            _slug: &str,
            _request: &BookingRequest,
        ) -> Result<BookingConfirmation> {
            Err(SalonKitError::Internal("not used".into()))
        }
    }

    /// Fails the first `failures_left` availability calls, then serves
    /// `data`
    struct FlakyAvailabilityApi {
        failures_left: AtomicUsize,
        data: AvailabilityData,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BookingApi for FlakyAvailabilityApi {
        async fn fetch_company(&self, _slug: &str) -> Result<Company> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_catalog(&self, _slug: &str) -> Result<Vec<Category>> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_staff(&self, _slug: &str) -> Result<Vec<Staff>> {
            Err(SalonKitError::Internal("not used".into()))
        }
        async fn fetch_availability(
            &self,
            _slug: &str,
            _staff_id: &str,
            _date_from: NaiveDate,
            _service_ids: &[String],
        ) -> Result<AvailabilityData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(SalonKitError::Network("connection reset".into()));
            }
            Ok(self.data.clone())
        }
        async fn create_booking(
            &self,
            _slug: &str,
            _request: &BookingRequest,
        ) -> Result<BookingConfirmation> {
            Err(SalonKitError::Internal("not used".into()))
        }
    }

    fn day(date: &str, ranges: Vec<TimeRange>) -> DayAvailability {
        DayAvailability { date: date.parse().unwrap(), time_ranges: ranges }
    }

    fn range(start: &str, end: &str, available: bool) -> TimeRange {
        TimeRange { start_time: start.into(), end_time: end.into(), is_available: available }
    }

    fn engine_with(data: AvailabilityData) -> AvailabilityEngine {
        let api = Arc::new(FixedAvailabilityApi { response: Ok(data) });
        AvailabilityEngine::new(api, "glow-salon", chrono_tz::UTC)
    }

    fn key(month: &str) -> FetchKey {
        FetchKey::new("st-1", vec!["svc-1".into()], month.parse().unwrap())
    }

    #[tokio::test]
    async fn refresh_caches_flat_month() {
        let mut engine = engine_with(AvailabilityData::Days(vec![day(
            "2025-01-10",
            vec![range("09:00", "09:30", true)],
        )]));
        engine.refresh(key("2025-01-01")).await.unwrap();

        assert!(engine.has_available_slots("2025-01-10".parse().unwrap()));
        assert!(!engine.has_available_slots("2025-01-11".parse().unwrap()));
    }

    #[tokio::test]
    async fn refresh_flattens_week_nesting() {
        let weeks = AvailabilityData::Weeks(vec![
            WeekAvailability { days: vec![day("2025-01-06", vec![range("08:00", "09:00", true)])] },
            WeekAvailability { days: vec![day("2025-01-13", vec![range("08:00", "09:00", true)])] },
        ]);
        let mut engine = engine_with(weeks);
        engine.refresh(key("2025-01-01")).await.unwrap();

        assert!(engine.has_available_slots("2025-01-06".parse().unwrap()));
        assert!(engine.has_available_slots("2025-01-13".parse().unwrap()));
    }

    #[tokio::test]
    async fn fetch_failure_means_empty_month_not_error() {
        let api = Arc::new(FixedAvailabilityApi {
            response: Err(SalonKitError::Network("connection reset".into())),
        });
        let mut engine = AvailabilityEngine::new(api, "glow-salon", chrono_tz::UTC);
        engine.refresh(key("2025-01-01")).await.unwrap();

        // The month renders as empty but the failed cycle is not recorded,
        // so the same key stays eligible for a retry
        assert!(engine.current_key().is_none());
        assert!(!engine.has_available_slots("2025-01-10".parse().unwrap()));
    }

    #[tokio::test]
    async fn failed_cycle_retries_and_recovers() {
        let api = Arc::new(FlakyAvailabilityApi {
            failures_left: AtomicUsize::new(1),
            data: AvailabilityData::Days(vec![day(
                "2025-01-10",
                vec![range("09:00", "09:30", true)],
            )]),
            calls: AtomicUsize::new(0),
        });
        let mut engine = AvailabilityEngine::new(
            Arc::clone(&api) as Arc<dyn BookingApi>,
            "glow-salon",
            chrono_tz::UTC,
        );

        engine.refresh(key("2025-01-01")).await.unwrap();
        assert!(!engine.has_available_slots("2025-01-10".parse().unwrap()));

        engine.refresh(key("2025-01-01")).await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert!(engine.has_available_slots("2025-01-10".parse().unwrap()));
        assert!(engine.current_key().is_some());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut engine = engine_with(AvailabilityData::empty());

        let stale = engine.begin_fetch(key("2025-01-01"));
        let fresh = engine.begin_fetch(key("2025-02-01"));

        let applied_fresh = engine.apply(
            fresh,
            AvailabilityData::Days(vec![day("2025-02-03", vec![range("09:00", "10:00", true)])]),
        );
        let applied_stale = engine.apply(
            stale,
            AvailabilityData::Days(vec![day("2025-01-10", vec![range("09:00", "10:00", true)])]),
        );

        assert!(applied_fresh);
        assert!(!applied_stale);
        // The stale January data never lands
        assert!(engine.has_available_slots("2025-02-03".parse().unwrap()));
        assert!(!engine.has_available_slots("2025-01-10".parse().unwrap()));
        assert_eq!(engine.current_key().unwrap().month, "2025-02-01".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn day_with_only_zero_width_ranges_is_still_available() {
        let mut engine = engine_with(AvailabilityData::empty());
        let ticket = engine.begin_fetch(key("2025-01-01"));
        engine.apply(
            ticket,
            AvailabilityData::Days(vec![day("2025-01-10", vec![range("09:00", "09:00", true)])]),
        );
        assert!(engine.has_available_slots("2025-01-10".parse().unwrap()));
    }

    #[test]
    fn day_with_only_unavailable_ranges_is_not_available() {
        let mut engine = engine_with(AvailabilityData::empty());
        let ticket = engine.begin_fetch(key("2025-01-01"));
        engine.apply(
            ticket,
            AvailabilityData::Days(vec![day("2025-01-10", vec![range("09:00", "12:00", false)])]),
        );
        assert!(!engine.has_available_slots("2025-01-10".parse().unwrap()));
    }

    #[test]
    fn slots_for_uses_cache_only() {
        let mut engine = engine_with(AvailabilityData::empty());
        let ticket = engine.begin_fetch(key("2025-01-01"));
        engine.apply(
            ticket,
            AvailabilityData::Days(vec![day("2025-01-10", vec![range("09:00", "09:30", true)])]),
        );

        let slots = engine.slots_for("2025-01-10".parse().unwrap(), SlotPolicy::Permissive);
        assert_eq!(slots.len(), 3);
        assert!(engine.slots_for("2025-01-11".parse().unwrap(), SlotPolicy::Permissive).is_empty());
    }

    #[test]
    fn fetch_key_normalizes_month_and_service_order() {
        let a = FetchKey::new("st-1", vec!["b".into(), "a".into()], "2025-01-17".parse().unwrap());
        let b = FetchKey::new("st-1", vec!["a".into(), "b".into()], "2025-01-02".parse().unwrap());
        assert_eq!(a, b);
    }
}

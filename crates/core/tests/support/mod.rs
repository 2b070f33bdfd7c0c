//! Shared fixtures and in-memory port mocks for wizard tests

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use salonkit_core::ports::BookingApi;
use salonkit_domain::{
    AvailabilityData, BookingConfirmation, BookingRequest, Category, Company, DayAvailability,
    Result, SalonKitError, Service, Staff, TimeRange,
};

pub fn service(id: &str, name: &str, price_cents: i64, duration: u32, staff: &[&str]) -> Service {
    Service {
        id: id.into(),
        name: name.into(),
        name_translations: HashMap::new(),
        duration_minutes: duration,
        price_cents,
        discount_price_cents: None,
        category_id: None,
        assigned_staff_ids: staff.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    }
}

pub fn staff_member(id: &str, first: &str, last: &str) -> Staff {
    Staff {
        id: id.into(),
        user_id: format!("user-{id}"),
        first_name: first.into(),
        last_name: last.into(),
        avatar_url: None,
        languages: None,
        position: None,
    }
}

pub fn day(date: &str, ranges: Vec<TimeRange>) -> DayAvailability {
    DayAvailability { date: date.parse().unwrap(), time_ranges: ranges }
}

pub fn open_range(start: &str, end: &str) -> TimeRange {
    TimeRange { start_time: start.into(), end_time: end.into(), is_available: true }
}

/// In-memory mock of the salon platform API.
///
/// Serves fixed catalog/staff/availability data, counts availability
/// fetches, and records the last submitted booking request.
pub struct MockBookingApi {
    pub catalog: Vec<Category>,
    pub staff: Vec<Staff>,
    pub availability: Vec<DayAvailability>,
    pub booking_response: std::result::Result<BookingConfirmation, SalonKitError>,
    /// Number of upcoming availability calls to fail with a network error
    pub availability_failures: AtomicUsize,
    pub availability_fetches: AtomicUsize,
    pub booking_calls: AtomicUsize,
    pub last_booking: Mutex<Option<BookingRequest>>,
}

impl MockBookingApi {
    pub fn new(catalog: Vec<Category>, staff: Vec<Staff>, availability: Vec<DayAvailability>) -> Self {
        Self {
            catalog,
            staff,
            availability,
            booking_response: Ok(BookingConfirmation { id: "bk-1".into() }),
            availability_failures: AtomicUsize::new(0),
            availability_fetches: AtomicUsize::new(0),
            booking_calls: AtomicUsize::new(0),
            last_booking: Mutex::new(None),
        }
    }

    pub fn with_booking_error(mut self, message: &str) -> Self {
        self.booking_response = Err(SalonKitError::Api(message.into()));
        self
    }

    pub fn with_availability_failures(self, count: usize) -> Self {
        self.availability_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn availability_fetch_count(&self) -> usize {
        self.availability_fetches.load(Ordering::SeqCst)
    }

    pub fn booking_call_count(&self) -> usize {
        self.booking_calls.load(Ordering::SeqCst)
    }

    pub fn last_booking(&self) -> Option<BookingRequest> {
        self.last_booking.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn fetch_company(&self, _slug: &str) -> Result<Company> {
        Ok(Company { name: "Glow Salon".into(), logo_url: None })
    }

    async fn fetch_catalog(&self, _slug: &str) -> Result<Vec<Category>> {
        Ok(self.catalog.clone())
    }

    async fn fetch_staff(&self, _slug: &str) -> Result<Vec<Staff>> {
        Ok(self.staff.clone())
    }

    async fn fetch_availability(
        &self,
        _slug: &str,
        _staff_id: &str,
        _date_from: NaiveDate,
        _service_ids: &[String],
    ) -> Result<AvailabilityData> {
        self.availability_fetches.fetch_add(1, Ordering::SeqCst);
        if self.availability_failures.load(Ordering::SeqCst) > 0 {
            self.availability_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(SalonKitError::Network("connection reset".into()));
        }
        Ok(AvailabilityData::Days(self.availability.clone()))
    }

    async fn create_booking(
        &self,
        _slug: &str,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_booking.lock().unwrap() = Some(request.clone());
        self.booking_response.clone()
    }
}

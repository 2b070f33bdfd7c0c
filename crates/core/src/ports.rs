//! Port interfaces for the booking engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use salonkit_domain::{
    AvailabilityData, BookingConfirmation, BookingRequest, Category, Company, Result, Staff,
};

/// Public salon-platform API as consumed by the wizard
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Fetch the public identity of a company by slug
    async fn fetch_company(&self, slug: &str) -> Result<Company>;

    /// Fetch the nested category/service tree
    async fn fetch_catalog(&self, slug: &str) -> Result<Vec<Category>>;

    /// Fetch the staff roster with per-service assignment references
    async fn fetch_staff(&self, slug: &str) -> Result<Vec<Staff>>;

    /// Fetch monthly availability for one staff member, scoped to the first
    /// day of the displayed month
    async fn fetch_availability(
        &self,
        slug: &str,
        staff_id: &str,
        date_from: NaiveDate,
        service_ids: &[String],
    ) -> Result<AvailabilityData>;

    /// Submit an assembled booking
    async fn create_booking(
        &self,
        slug: &str,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation>;
}

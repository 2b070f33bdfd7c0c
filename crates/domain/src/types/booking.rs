//! Booking submission types and company identity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public identity of the company being booked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Contact details collected on the final wizard step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Local number without the country code
    pub phone: String,
    /// Dialing prefix (e.g. "+41")
    pub phone_country_code: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl CustomerInfo {
    /// Full phone number as submitted: country code concatenated with the
    /// local number.
    pub fn full_phone(&self) -> String {
        format!("{}{}", self.phone_country_code, self.phone)
    }
}

/// One line item of the submitted booking, one per selected service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingItem {
    pub service_id: String,
    pub staff_id: String,
}

/// Customer block as serialized into the booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl From<&CustomerInfo> for CustomerPayload {
    fn from(info: &CustomerInfo) -> Self {
        Self {
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            email: info.email.clone(),
            phone: info.full_phone(),
            birthday: info.birthday,
            notes: info.notes.clone(),
        }
    }
}

/// Assembled booking submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Absolute start instant, serialized in UTC
    pub starts_at: DateTime<Utc>,
    pub items: Vec<BookingItem>,
    pub customer: CustomerPayload,
    /// Client-generated key so a retried submission is not double-booked
    pub idempotency_key: Uuid,
}

/// Server response to a successful booking submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub id: String,
}

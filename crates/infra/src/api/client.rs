//! Salon platform API client
//!
//! Thin `reqwest` adapter behind the core `BookingApi` port. Every endpoint
//! answers with the platform's JSON envelope `{success, data?, message?}`;
//! an envelope with `success = false` surfaces the server's message
//! verbatim as an API error.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use salonkit_core::ports::BookingApi;
use salonkit_domain::constants::DATE_FORMAT;
use salonkit_domain::{
    ApiConfig, AvailabilityData, BookingConfirmation, BookingRequest, Category, Company, Result,
    SalonKitError, Staff,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Response envelope shared by all public endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the public salon platform API
pub struct SalonApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl SalonApiClient {
    /// Build a client from configuration. The request timeout applies to
    /// every call; a timed-out request surfaces as a retryable network
    /// error.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SalonKitError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        unwrap_envelope(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST request");

        let response =
            self.http.post(&url).json(body).send().await.map_err(map_transport_error)?;
        unwrap_envelope(response).await
    }
}

#[async_trait]
impl BookingApi for SalonApiClient {
    async fn fetch_company(&self, slug: &str) -> Result<Company> {
        self.get(&format!("/companies/slug/{slug}"), &[]).await
    }

    async fn fetch_catalog(&self, slug: &str) -> Result<Vec<Category>> {
        self.get(&format!("/public/companies/{slug}/services"), &[]).await
    }

    async fn fetch_staff(&self, slug: &str) -> Result<Vec<Staff>> {
        self.get(&format!("/public/companies/{slug}/staff"), &[]).await
    }

    async fn fetch_availability(
        &self,
        slug: &str,
        staff_id: &str,
        date_from: NaiveDate,
        service_ids: &[String],
    ) -> Result<AvailabilityData> {
        let path = format!("/public/companies/{slug}/users/{staff_id}/availability");
        let query = [
            ("date_from", date_from.format(DATE_FORMAT).to_string()),
            ("availability_type", "monthly".to_string()),
            ("service_ids", service_ids.join(",")),
        ];

        // The payload shape has varied across API versions; degrade to an
        // empty month when it matches none of the known shapes.
        let raw: serde_json::Value = self.get(&path, &query).await?;
        match serde_json::from_value::<AvailabilityData>(raw) {
            Ok(data) => Ok(data),
            Err(err) => {
                debug!(error = %err, "Unrecognized availability payload, treating as empty");
                Ok(AvailabilityData::empty())
            }
        }
    }

    async fn create_booking(
        &self,
        slug: &str,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation> {
        let confirmation: BookingConfirmation =
            self.post(&format!("/public/companies/{slug}/bookings"), request).await?;
        info!(booking_id = %confirmation.id, "Booking submitted");
        Ok(confirmation)
    }
}

fn map_transport_error(err: reqwest::Error) -> SalonKitError {
    if err.is_timeout() {
        SalonKitError::Network(format!("Request timed out: {err}"))
    } else {
        SalonKitError::Network(format!("Request failed: {err}"))
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SalonKitError::Network(format!("Failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
        .map_err(|e| SalonKitError::Api(format!("Malformed response envelope: {e}")))?;

    if !envelope.success {
        let message = envelope.message.unwrap_or_else(|| "Request rejected".to_string());
        warn!(message = %message, "API reported failure");
        return Err(SalonKitError::Api(message));
    }
    envelope.data.ok_or_else(|| SalonKitError::Api("Response envelope missing data".to_string()))
}

fn map_status_error(status: StatusCode, body: &str) -> SalonKitError {
    // Error responses often still carry the envelope; prefer its message
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.message)
        .unwrap_or_else(|| format!("Server returned status {status}"));

    if status == StatusCode::NOT_FOUND {
        SalonKitError::NotFound(message)
    } else if status.is_client_error() {
        SalonKitError::Api(message)
    } else {
        SalonKitError::Network(message)
    }
}

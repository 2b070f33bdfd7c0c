//! # SalonKit Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The catalog tree with multilingual search
//! - Staff roster eligibility filtering
//! - The availability engine and slot derivation
//! - Pricing aggregation
//! - The booking wizard state machine
//! - The `BookingApi` port the HTTP adapter implements
//!
//! ## Architecture Principles
//! - Only depends on `salonkit-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod availability;
pub mod catalog;
pub mod ports;
pub mod pricing;
pub mod roster;
pub mod wizard;

// Re-export specific items to avoid ambiguity
pub use availability::slots::{derive_slots, SlotPolicy};
pub use availability::{AvailabilityEngine, FetchKey, FetchTicket};
pub use catalog::{CatalogTree, SearchHit};
pub use ports::BookingApi;
pub use pricing::{effective_price_cents, total_duration_minutes, total_price};
pub use roster::StaffRoster;
pub use wizard::{BookingWizard, BookingWizardState, Step};

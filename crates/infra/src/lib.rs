//! # SalonKit Infra
//!
//! Infrastructure adapters for the booking engine.
//!
//! This crate contains:
//! - The `reqwest`-based HTTP adapter implementing the core `BookingApi` port
//! - The configuration loader (environment first, file fallback)
//! - The file-backed display-language preference store

pub mod api;
pub mod config;
pub mod language;

pub use api::SalonApiClient;
pub use language::LanguagePreferenceStore;

//! # SalonKit Domain
//!
//! Business domain types and models for the SalonKit booking wizard.
//!
//! This crate contains:
//! - Catalog, staff, availability, and booking data types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other SalonKit crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

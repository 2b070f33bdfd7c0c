//! Error types used throughout the booking engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SalonKit
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SalonKitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for SalonKit operations
pub type Result<T> = std::result::Result<T, SalonKitError>;

//! Availability wire types and derived slots
//!
//! The public API reports availability per calendar date as a list of UTC
//! wall-clock time ranges. Ranges are not normalized: they may overlap and
//! are not guaranteed sorted. Slots are ephemeral, derived client-side, and
//! never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One provider-declared interval on a given date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    /// UTC wall-clock start on the record's date ("HH:MM" or "HH:MM:SS")
    pub start_time: String,
    /// UTC wall-clock end on the record's date
    pub end_time: String,
    pub is_available: bool,
}

/// Availability for a single calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    #[serde(default)]
    pub time_ranges: Vec<TimeRange>,
}

/// One week's worth of day records, as nested by some API versions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekAvailability {
    pub days: Vec<DayAvailability>,
}

/// Monthly availability payload
///
/// The endpoint has shipped both a flat list of day records and a
/// list-of-weeks nesting. Both decode here; the engine flattens either
/// shape to one flat list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityData {
    Days(Vec<DayAvailability>),
    Weeks(Vec<WeekAvailability>),
}

impl AvailabilityData {
    pub fn empty() -> Self {
        Self::Days(Vec::new())
    }
}

/// A discrete bookable instant derived from an availability window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Local time of day, zero-padded "HH:MM"
    pub time: String,
    pub available: bool,
}

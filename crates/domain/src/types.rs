//! Domain data types for the booking wizard

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod staff;

pub use availability::{AvailabilityData, DayAvailability, TimeRange, TimeSlot, WeekAvailability};
pub use booking::{
    BookingConfirmation, BookingItem, BookingRequest, Company, CustomerInfo, CustomerPayload,
};
pub use catalog::{Category, CategoryId, Service, ServiceId};
pub use staff::{Staff, StaffId};

//! HTTP adapter for the public salon platform API

mod client;

pub use client::SalonApiClient;

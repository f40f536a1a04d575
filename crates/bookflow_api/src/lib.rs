// --- File: crates/bookflow_api/src/lib.rs ---
// Declare modules within this crate
pub mod client;
#[cfg(test)]
mod client_test;
pub mod error;
pub mod service;

pub use client::BookingApiClient;
pub use error::ApiError;
pub use service::WidgetApiService;

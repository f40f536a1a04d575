// --- File: crates/bookflow_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;   // Shared domain model for the booking widget
pub mod money;    // Integer-cent money primitives and wire conversion
pub mod error;    // Error taxonomy shared across the widget crates
pub mod http;     // HTTP client utilities
pub mod services; // Service abstractions (dependency-injection seams)
pub mod logging;  // Logging initialization

// Re-export error types and utilities for easier access
pub use error::{
    config_error, internal_error, network_error, submission_error, validation_error, WidgetError,
};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, get, post_json, HTTP_CLIENT};

// This crate provides the shared foundation used by every bookflow crate:
// the domain model, money handling, the error taxonomy, HTTP plumbing and
// the service traits the composition root injects implementations for.

// --- File: crates/bookflow_common/src/services.rs ---
//! Service abstractions for the booking API.
//!
//! This module provides trait definitions for the remote operations the
//! widget depends on. These traits allow for dependency injection and easier
//! testing by decoupling the flow runtime from the concrete HTTP client.

use crate::models::{
    AvailabilityQuery, AvailabilityResult, BookingConfirmation, CreateBookingRequest,
    ServiceItemCatalog, WidgetConfig,
};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Configuration and catalog operations.
///
/// `fetch_config` is a single request with no retry policy; the caller
/// renders the failure text verbatim. `fetch_service_items` is issued once
/// per service selection change; staleness of a late response is decided by
/// the caller, not here.
pub trait ConfigService: Send + Sync {
    /// Error type returned by configuration operations.
    type Error: StdError + Send + Sync + 'static;

    /// Fetch the widget configuration for the embedded business.
    fn fetch_config(&self) -> BoxFuture<'_, WidgetConfig, Self::Error>;

    /// Fetch the service-item catalog for one service.
    fn fetch_service_items(
        &self,
        service_id: &str,
    ) -> BoxFuture<'_, ServiceItemCatalog, Self::Error>;
}

/// Staff availability lookup for a candidate date/time/duration/service.
pub trait AvailabilityService: Send + Sync {
    /// Error type returned by availability operations.
    type Error: StdError + Send + Sync + 'static;

    /// Check whether the queried slot can be staffed. A denial is a normal
    /// result carrying alternate slots, not an error.
    fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> BoxFuture<'_, AvailabilityResult, Self::Error>;
}

/// Final booking submission.
pub trait BookingService: Send + Sync {
    /// Error type returned by booking operations.
    type Error: StdError + Send + Sync + 'static;

    /// Post the assembled booking exactly once. A server rejection carries
    /// the message to surface verbatim.
    fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> BoxFuture<'_, BookingConfirmation, Self::Error>;
}

/// A factory for the service instances the widget runtime injects.
///
/// The composition root builds one factory per widget instance; everything
/// downstream sees only the trait objects.
pub trait ClientFactory: Send + Sync {
    /// Get the configuration/catalog service.
    fn config_service(&self) -> Arc<dyn ConfigService<Error = BoxedError>>;

    /// Get the availability service.
    fn availability_service(&self) -> Arc<dyn AvailabilityService<Error = BoxedError>>;

    /// Get the booking submission service.
    fn booking_service(&self) -> Arc<dyn BookingService<Error = BoxedError>>;
}

// --- File: crates/bookflow_api/src/service.rs ---
//! Booking API service implementation.
//!
//! This module adapts [`BookingApiClient`] to the service traits from
//! `bookflow_common`, so the widget runtime only ever sees trait objects.

use crate::client::BookingApiClient;
use bookflow_common::models::{
    AvailabilityQuery, AvailabilityResult, BookingConfirmation, CreateBookingRequest,
    ServiceItemCatalog, WidgetConfig,
};
use bookflow_common::services::{
    AvailabilityService, BookingService, BoxFuture, BoxedError, ConfigService,
};
use std::sync::Arc;

/// The HTTP-backed implementation of the widget's remote operations.
pub struct WidgetApiService {
    client: Arc<BookingApiClient>,
}

impl WidgetApiService {
    pub fn new(client: Arc<BookingApiClient>) -> Self {
        Self { client }
    }
}

impl ConfigService for WidgetApiService {
    type Error = BoxedError;

    fn fetch_config(&self) -> BoxFuture<'_, WidgetConfig, Self::Error> {
        Box::pin(async move {
            self.client
                .fetch_config()
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }

    fn fetch_service_items(
        &self,
        service_id: &str,
    ) -> BoxFuture<'_, ServiceItemCatalog, Self::Error> {
        let service_id = service_id.to_string();
        Box::pin(async move {
            self.client
                .fetch_service_items(&service_id)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

impl AvailabilityService for WidgetApiService {
    type Error = BoxedError;

    fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> BoxFuture<'_, AvailabilityResult, Self::Error> {
        let query = query.clone();
        Box::pin(async move {
            self.client
                .check_availability(&query)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

impl BookingService for WidgetApiService {
    type Error = BoxedError;

    fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> BoxFuture<'_, BookingConfirmation, Self::Error> {
        let request = request.clone();
        Box::pin(async move {
            self.client
                .create_booking(&request)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

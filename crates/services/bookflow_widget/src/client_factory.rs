// --- File: crates/services/bookflow_widget/src/client_factory.rs ---
//! Client factory implementation.
//!
//! This module provides the [`ClientFactory`] implementation backing a live
//! widget: one HTTP client per widget instance, exposed to the runtime only
//! as the three service trait objects. Tests substitute their own factory
//! to drive the widget without a network.

use bookflow_api::{ApiError, BookingApiClient, WidgetApiService};
use bookflow_common::services::{
    AvailabilityService, BookingService, BoxedError, ClientFactory, ConfigService,
};
use bookflow_config::WidgetDefaults;
use bookflow_host::WidgetContext;
use std::sync::Arc;
use tracing::info;

pub struct HttpClientFactory {
    service: Arc<WidgetApiService>,
}

impl HttpClientFactory {
    /// Build the API client for the resolved embed context.
    pub fn new(context: &WidgetContext, defaults: &WidgetDefaults) -> Result<Self, ApiError> {
        info!(
            business = %context.business_id,
            api_base = %context.api_base_url,
            "ℹ️ Initializing booking API client"
        );
        let client = BookingApiClient::new(
            &context.api_base_url,
            &defaults.api_path_prefix,
            &context.business_id,
            defaults.request_timeout_secs,
        )?;
        Ok(Self {
            service: Arc::new(WidgetApiService::new(Arc::new(client))),
        })
    }
}

impl ClientFactory for HttpClientFactory {
    fn config_service(&self) -> Arc<dyn ConfigService<Error = BoxedError>> {
        self.service.clone()
    }

    fn availability_service(&self) -> Arc<dyn AvailabilityService<Error = BoxedError>> {
        self.service.clone()
    }

    fn booking_service(&self) -> Arc<dyn BookingService<Error = BoxedError>> {
        self.service.clone()
    }
}

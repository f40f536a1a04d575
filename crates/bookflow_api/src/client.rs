// --- File: crates/bookflow_api/src/client.rs ---
//! HTTP client for the public widget endpoints of the booking API.
//!
//! One client instance is scoped to one business. All endpoints share the
//! `success` envelope convention: HTTP status codes carry the coarse
//! category (404 unknown business, 403 inactive business) and the body
//! carries the server's own error text, which the widget surfaces verbatim.

use crate::error::ApiError;
use bookflow_common::http::client::create_client;
use bookflow_common::models::{
    AvailabilityQuery, AvailabilityResult, BookingConfirmation, BusinessInfo,
    CreateBookingRequest, CustomFieldDefinition, Service, ServiceItemCatalog, WidgetConfig,
};
use http::StatusCode;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

pub struct BookingApiClient {
    client: Client,
    /// Base URL of the widget endpoints for this business, without a
    /// trailing slash, e.g. `https://host/bookings/widget/biz-123`.
    widget_base: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigEnvelope {
    business: Option<BusinessInfo>,
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    custom_fields: Vec<CustomFieldDefinition>,
}

impl BookingApiClient {
    /// Create a client for one business.
    ///
    /// `api_base_url` is the origin (or base) configured on the embed,
    /// `path_prefix` the widget endpoint prefix (`/bookings/widget` unless
    /// the host overrides it).
    pub fn new(
        api_base_url: &str,
        path_prefix: &str,
        business_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = create_client(timeout_secs).map_err(ApiError::transport)?;
        let widget_base = format!(
            "{}{}/{}",
            api_base_url.trim_end_matches('/'),
            path_prefix,
            business_id
        );
        Ok(Self {
            client,
            widget_base,
        })
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/{}/", self.widget_base, suffix)
    }

    /// Fetch the widget configuration: business identity, services and
    /// custom-field definitions. Single request, no retry; the caller
    /// renders failures verbatim.
    pub async fn fetch_config(&self) -> Result<WidgetConfig, ApiError> {
        let url = self.endpoint("config");
        debug!(%url, "fetching widget configuration");
        let response = self.client.get(&url).send().await.map_err(ApiError::transport)?;
        let envelope: ConfigEnvelope = decode(response).await?;
        let business = envelope.business.ok_or_else(|| {
            ApiError::Server("Configuration response is missing the business.".to_string())
        })?;
        Ok(WidgetConfig {
            business,
            services: envelope.services,
            custom_fields: envelope.custom_fields,
        })
    }

    /// Fetch the service-item catalog for one service. The response echoes
    /// the originating service id, which the flow uses to discard stale
    /// responses after the selection has moved on.
    pub async fn fetch_service_items(
        &self,
        service_id: &str,
    ) -> Result<ServiceItemCatalog, ApiError> {
        let url = format!("{}/service-items/{}/", self.widget_base, service_id);
        debug!(%url, "fetching service items");
        let response = self.client.get(&url).send().await.map_err(ApiError::transport)?;
        decode(response).await
    }

    /// Check staff availability for a candidate slot.
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, ApiError> {
        let url = self.endpoint("check-availability");
        debug!(%url, date = %query.date, time = %query.start_time, "checking availability");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("date", query.date.to_string()),
                ("time", query.start_time.format("%H:%M").to_string()),
                ("durationMinutes", query.duration_minutes.to_string()),
                ("serviceId", query.service_id.clone()),
            ])
            .send()
            .await
            .map_err(ApiError::transport)?;
        decode(response).await
    }

    /// Post the assembled booking. Called exactly once per submit attempt;
    /// a rejection keeps the draft on the caller's side.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        let url = self.endpoint("create");
        debug!(%url, service = %request.service_type, "creating booking");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::transport)?;
        decode(response).await
    }
}

/// Unwrap the `success` envelope around a widget endpoint response.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::transport)?;

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if status == StatusCode::FORBIDDEN {
        let message = error_message(&body)
            .unwrap_or_else(|| "This business is not accepting bookings right now.".to_string());
        return Err(ApiError::BusinessInactive(message));
    }

    let value: serde_json::Value = serde_json::from_str(&body)?;
    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = error_message(&body)
            .unwrap_or_else(|| "The booking service returned an error.".to_string());
        error!(%status, %message, "booking API reported failure");
        return Err(ApiError::Server(message));
    }
    Ok(serde_json::from_value(value)?)
}

/// Pull the server's error text out of a failure body. The API uses either
/// a single `error` string or a list under `errors`.
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        errors: Vec<String>,
    }

    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    if let Some(error) = envelope.error {
        return Some(error);
    }
    if envelope.errors.is_empty() {
        None
    } else {
        Some(envelope.errors.join(" "))
    }
}

// --- File: crates/bookflow_api/src/error.rs ---
use bookflow_common::error::WidgetError;
use thiserror::Error;

/// Errors produced by the booking API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Booking API request failed: {0}")]
    Request(reqwest::Error),
    #[error("Booking API request timed out")]
    Timeout,
    #[error("Failed to parse booking API response: {0}")]
    Parse(#[from] serde_json::Error),
    /// The server answered with `success: false`; the message is the
    /// server's own error text and is surfaced verbatim.
    #[error("{0}")]
    Server(String),
    #[error("Business not found")]
    NotFound,
    /// The business exists but is not accepting bookings.
    #[error("{0}")]
    BusinessInactive(String),
}

impl ApiError {
    /// Classify a transport-level failure.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Request(err)
        }
    }

    /// The text rendered inside the widget for this error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(_) | ApiError::Timeout => {
                "Unable to reach the booking service. Please try again.".to_string()
            }
            ApiError::Parse(_) => "Received an unexpected response from the booking service."
                .to_string(),
            ApiError::Server(message) | ApiError::BusinessInactive(message) => message.clone(),
            ApiError::NotFound => "Business not found".to_string(),
        }
    }
}

impl From<ApiError> for WidgetError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(inner) => WidgetError::Network(inner.to_string()),
            ApiError::Timeout => WidgetError::Timeout("booking API request".to_string()),
            ApiError::Parse(inner) => WidgetError::Parse(inner.to_string()),
            ApiError::Server(message) | ApiError::BusinessInactive(message) => {
                WidgetError::Network(message)
            }
            ApiError::NotFound => WidgetError::NotFound("Business not found".to_string()),
        }
    }
}

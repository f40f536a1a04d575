// --- File: crates/bookflow_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error taxonomy shared across the widget crates.
///
/// Every boundary (mount, fetch, validation, submission) converts its local
/// failure into one of these variants before it reaches the rendering layer.
/// Errors never escape the widget as panics; they become user-visible state.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// The embed is unusable, e.g. the business identifier is missing.
    /// This is the only fatal category: no further interaction is possible.
    #[error("Widget configuration error: {0}")]
    Configuration(String),

    /// A network request failed. Rendered as a dismissable inline message;
    /// the user retries by re-triggering the action.
    #[error("Network request failed: {0}")]
    Network(String),

    /// A network request exceeded the client-side timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Failed to parse a response from the booking API.
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// A client-side required-field or business-rule violation. Blocks the
    /// step transition or submission; never sent to the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested business or service does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server rejected the final booking. The message is surfaced
    /// verbatim and the draft is preserved for correction.
    #[error("Booking submission failed: {0}")]
    Submission(String),

    /// Anything that does not fit the categories above.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WidgetError {
    /// The text rendered verbatim inside the widget for this error.
    pub fn user_message(&self) -> &str {
        match self {
            WidgetError::Configuration(msg)
            | WidgetError::Network(msg)
            | WidgetError::Timeout(msg)
            | WidgetError::Parse(msg)
            | WidgetError::Validation(msg)
            | WidgetError::NotFound(msg)
            | WidgetError::Submission(msg)
            | WidgetError::Internal(msg) => msg,
        }
    }

    /// Whether this error ends the widget session. Only a configuration
    /// error at mount time qualifies; everything else leaves the flow
    /// interactive.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WidgetError::Configuration(_))
    }
}

// Common error conversions
impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WidgetError::Timeout(err.to_string())
        } else {
            WidgetError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Parse(err.to_string())
    }
}

// Utility constructors for error handling
pub fn config_error<T: fmt::Display>(message: T) -> WidgetError {
    WidgetError::Configuration(message.to_string())
}

pub fn network_error<T: fmt::Display>(message: T) -> WidgetError {
    WidgetError::Network(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> WidgetError {
    WidgetError::Validation(message.to_string())
}

pub fn submission_error<T: fmt::Display>(message: T) -> WidgetError {
    WidgetError::Submission(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> WidgetError {
    WidgetError::Internal(message.to_string())
}

// --- File: crates/bookflow_config/src/models.rs ---
use serde::{Deserialize, Serialize};

/// Fallback primary color used when neither the embed attributes nor the
/// fetched business configuration provide one.
pub const DEFAULT_PRIMARY_COLOR: &str = "#8b5cf6";

/// Default client-side request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Path prefix of the public widget endpoints on the booking API.
pub const DEFAULT_API_PATH_PREFIX: &str = "/bookings/widget";

/// Embed-level defaults for the widget engine.
///
/// These are the values the host application can tune without touching the
/// embed markup. Mount attributes always win over these defaults; the
/// defaults only fill the gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDefaults {
    /// Fallback brand color (hex), used until the business config provides one.
    pub primary_color: String,
    /// Client-side timeout applied to every API request.
    pub request_timeout_secs: u64,
    /// Prefix of the widget endpoints relative to the API base URL.
    pub api_path_prefix: String,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            api_path_prefix: DEFAULT_API_PATH_PREFIX.to_string(),
        }
    }
}

// --- File: crates/bookflow_config/src/lib.rs ---
//! Layered defaults for the widget engine.
//!
//! Loading order (later sources win): code defaults, an optional
//! `bookflow.toml` next to the host application, `BOOKFLOW_*` environment
//! overrides. The widget core never reads the environment itself; this
//! crate is the single place the embedding application's configuration
//! enters the system.

pub mod models;

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;

pub use models::{
    WidgetDefaults, DEFAULT_API_PATH_PREFIX, DEFAULT_PRIMARY_COLOR, DEFAULT_REQUEST_TIMEOUT_SECS,
};

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    // Best effort; a missing .env file is the normal case.
    let _ = dotenv::dotenv();
});

/// Loads a `.env` file once per process, if present.
pub fn ensure_dotenv_loaded() {
    Lazy::force(&DOTENV_LOADED);
}

/// Load the widget defaults from the layered sources.
pub fn load_defaults() -> Result<WidgetDefaults, ConfigError> {
    ensure_dotenv_loaded();
    let settings = Config::builder()
        .add_source(File::with_name("bookflow").required(false))
        .add_source(Environment::with_prefix("BOOKFLOW"))
        .build()?;
    settings.try_deserialize()
}

/// Like [`load_defaults`], but falls back to the code defaults on any
/// loading failure instead of surfacing it. Used by the widget mount path,
/// where a malformed host config file must not take the widget down.
pub fn load_defaults_or_fallback() -> WidgetDefaults {
    match load_defaults() {
        Ok(defaults) => defaults,
        Err(err) => {
            tracing::warn!("Failed to load widget defaults, using built-ins: {}", err);
            WidgetDefaults::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults() {
        let defaults = WidgetDefaults::default();
        assert_eq!(defaults.primary_color, "#8b5cf6");
        assert_eq!(defaults.request_timeout_secs, 30);
        assert_eq!(defaults.api_path_prefix, "/bookings/widget");
    }
}

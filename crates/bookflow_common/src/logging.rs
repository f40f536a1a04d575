// --- File: crates/bookflow_common/src/logging.rs ---
//! Logging initialization for hosts embedding the widget engine.
//!
//! The engine itself only emits `tracing` events; whether and how they are
//! collected is the host's decision. These helpers wire up a sensible
//! default subscriber for hosts that do not bring their own.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at the default level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum level.
///
/// Uses `try_init` so embedding twice (or next to a host that already set a
/// global subscriber) is harmless.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bookflow={}", level).parse().unwrap());

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_file(true).with_line_number(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

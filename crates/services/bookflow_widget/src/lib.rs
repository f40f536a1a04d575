// --- File: crates/services/bookflow_widget/src/lib.rs ---
//! The widget composition root.
//!
//! Wires the host adapter, the API clients and the step flow controller
//! together in the defined initialization order: resolve the embed context,
//! fetch the widget configuration, construct the controller, render. After
//! that the widget is a cooperative event loop: the host feeds events in,
//! the engine runs the requested effects against the injected services and
//! hands a fresh view back.

pub mod client_factory;
pub mod state;
pub mod widget;
#[cfg(test)]
mod widget_test;

pub use client_factory::HttpClientFactory;
pub use state::WidgetState;
pub use widget::{Widget, WidgetViewState};

// --- File: crates/bookflow_common/src/http.rs ---
//! HTTP utilities shared by the widget crates.

pub mod client;

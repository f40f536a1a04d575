// --- File: crates/bookflow_pricing/src/lib.rs ---
// Declare modules within this crate
pub mod engine;
#[cfg(test)]
mod engine_proptest;
pub mod selection;

pub use engine::{compute_totals, resolved_unit_price, PriceBreakdown};
pub use selection::{SelectedItem, SelectionState};

// --- File: crates/bookflow_flow/src/lib.rs ---
// Declare modules within this crate
pub mod controller;
pub mod draft;
pub mod steps;
pub mod submit;
pub mod validation;
pub mod view;

pub use controller::{
    AvailabilityStatus, Effect, FlowEvent, FlowPhase, ItemsState, StepFlowController,
};
pub use draft::BookingDraft;
pub use steps::Step;
pub use view::{render, WidgetView};

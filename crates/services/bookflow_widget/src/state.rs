// --- File: crates/services/bookflow_widget/src/state.rs ---
//! State shared by a mounted widget instance.

use bookflow_flow::StepFlowController;
use bookflow_host::{OverlayController, WidgetContext};

/// Everything a successfully initialized widget carries between events:
/// the resolved embed context, the flow controller owning the draft, and
/// the overlay state for modal embeds.
pub struct WidgetState {
    pub context: WidgetContext,
    pub controller: StepFlowController,
    pub overlay: OverlayController,
}

impl WidgetState {
    pub fn new(context: WidgetContext, controller: StepFlowController) -> Self {
        Self {
            context,
            controller,
            overlay: OverlayController::new(),
        }
    }
}

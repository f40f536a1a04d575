// --- File: crates/bookflow_host/src/overlay.rs ---
//! Modal overlay state and the host commands it drives.
//!
//! The engine never touches the page itself; opening and closing the modal
//! produce typed commands the host executes. The controller remembers the
//! scroll position captured at open time so closing restores the page
//! exactly as it was.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Instructions for the hosting layer.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Insert the overlay layer (with its close affordance) into the page.
    MountOverlay,
    /// Remove the overlay layer from the page.
    UnmountOverlay,
    /// Prevent the underlying page from scrolling while the modal is open.
    LockHostScroll,
    /// Restore scrolling and return to the recorded position.
    RestoreHostScroll(ScrollPosition),
}

/// Tracks whether the modal is open and what scroll state to restore.
#[derive(Debug, Default)]
pub struct OverlayController {
    saved_scroll: Option<ScrollPosition>,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.saved_scroll.is_some()
    }

    /// Open the overlay, recording the host's scroll position. Opening an
    /// already open overlay is a no-op.
    pub fn open(&mut self, scroll: ScrollPosition) -> Vec<HostCommand> {
        if self.is_open() {
            debug!("overlay already open");
            return Vec::new();
        }
        self.saved_scroll = Some(scroll);
        vec![HostCommand::MountOverlay, HostCommand::LockHostScroll]
    }

    /// Close the overlay, restoring the scroll state captured at open time.
    /// Closing a closed overlay is a no-op.
    pub fn close(&mut self) -> Vec<HostCommand> {
        match self.saved_scroll.take() {
            Some(scroll) => vec![
                HostCommand::RestoreHostScroll(scroll),
                HostCommand::UnmountOverlay,
            ],
            None => Vec::new(),
        }
    }
}

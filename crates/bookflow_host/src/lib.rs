// --- File: crates/bookflow_host/src/lib.rs ---
// Declare modules within this crate
pub mod mount;
pub mod overlay;
pub mod theme;

pub use mount::{resolve_context, DisplayMode, HostError, MountAttrs, WidgetContext};
pub use overlay::{HostCommand, OverlayController, ScrollPosition};
pub use theme::{theme_variables, CssVariable, Rgb, ROOT_CLASS};

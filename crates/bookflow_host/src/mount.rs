// --- File: crates/bookflow_host/src/mount.rs ---
//! Reading the embed configuration off the host page.
//!
//! The host hands the engine the attributes it found on the mount point
//! plus the page origin; this module resolves them into a complete
//! [`WidgetContext`]. The only fatal case in the whole widget lives here:
//! without a business identifier there is nothing to boot.

use bookflow_config::WidgetDefaults;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("The booking widget is missing its business identifier.")]
    MissingBusinessId,
}

/// How the widget is presented inside the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Rendered in place of the mount point.
    Inline,
    /// Rendered inside a full-page overlay with its own close affordance.
    Modal,
}

/// The raw embed attributes as read off the mount point, all optional
/// except the page origin the host always knows.
#[derive(Debug, Clone, Default)]
pub struct MountAttrs {
    pub business_id: Option<String>,
    pub api_base: Option<String>,
    pub color: Option<String>,
    pub mode: Option<String>,
    /// Origin of the hosting page, used when no API base is configured.
    pub page_origin: String,
}

/// The resolved embed configuration the rest of the widget runs on.
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub business_id: String,
    pub api_base_url: String,
    pub primary_color: String,
    pub display_mode: DisplayMode,
}

impl WidgetContext {
    pub fn modal_mode(&self) -> bool {
        self.display_mode == DisplayMode::Modal
    }
}

/// Resolve the mount attributes against the embed defaults.
///
/// The API base falls back to the page origin, the color to the configured
/// fallback; any mode other than `modal` is inline. Empty attribute values
/// are treated as absent.
pub fn resolve_context(
    attrs: &MountAttrs,
    defaults: &WidgetDefaults,
) -> Result<WidgetContext, HostError> {
    let business_id = attrs
        .business_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(HostError::MissingBusinessId)?;

    let api_base_url = attrs
        .api_base
        .as_deref()
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(&attrs.page_origin)
        .trim_end_matches('/')
        .to_string();

    let primary_color = attrs
        .color
        .as_deref()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(&defaults.primary_color)
        .to_string();

    let display_mode = match attrs.mode.as_deref().map(str::trim) {
        Some("modal") => DisplayMode::Modal,
        _ => DisplayMode::Inline,
    };

    Ok(WidgetContext {
        business_id: business_id.to_string(),
        api_base_url,
        primary_color,
        display_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> MountAttrs {
        MountAttrs {
            business_id: Some("biz-1".into()),
            api_base: None,
            color: None,
            mode: None,
            page_origin: "https://host.example".into(),
        }
    }

    #[test]
    fn missing_business_id_is_fatal() {
        let mut attrs = attrs();
        attrs.business_id = None;
        assert!(matches!(
            resolve_context(&attrs, &WidgetDefaults::default()),
            Err(HostError::MissingBusinessId)
        ));

        attrs.business_id = Some("   ".into());
        assert!(resolve_context(&attrs, &WidgetDefaults::default()).is_err());
    }

    #[test]
    fn api_base_defaults_to_page_origin() {
        let context = resolve_context(&attrs(), &WidgetDefaults::default()).unwrap();
        assert_eq!(context.api_base_url, "https://host.example");
        assert_eq!(context.primary_color, "#8b5cf6");
        assert_eq!(context.display_mode, DisplayMode::Inline);
    }

    #[test]
    fn explicit_attributes_win() {
        let mut attrs = attrs();
        attrs.api_base = Some("https://api.example/".into());
        attrs.color = Some("#112233".into());
        attrs.mode = Some("modal".into());
        let context = resolve_context(&attrs, &WidgetDefaults::default()).unwrap();
        assert_eq!(context.api_base_url, "https://api.example");
        assert_eq!(context.primary_color, "#112233");
        assert!(context.modal_mode());
    }
}

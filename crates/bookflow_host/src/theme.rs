// --- File: crates/bookflow_host/src/theme.rs ---
//! Style scoping and brand-color derivation.
//!
//! The widget's rules are namespaced under a dedicated root class so host
//! CSS cannot leak in and widget CSS cannot leak out. Brand customization
//! travels as a small set of CSS custom properties derived from the
//! configured primary color; the RGB triplet exists for translucent
//! overlays (`rgba(var(--bf-primary-rgb), 0.1)`).

use bookflow_config::DEFAULT_PRIMARY_COLOR;
use tracing::warn;

/// Class set on the widget root element; every widget style rule is scoped
/// beneath it.
pub const ROOT_CLASS: &str = "bookflow-widget";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Comma-separated triplet as consumed inside `rgba(...)`.
    pub fn triplet(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

/// A CSS custom property injected on the widget root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariable {
    pub name: &'static str,
    pub value: String,
}

/// Parse a `#rgb` or `#rrggbb` hex color.
pub fn parse_hex(color: &str) -> Option<Rgb> {
    let hex = color.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Rgb {
                r: digits.next()??,
                g: digits.next()??,
                b: digits.next()??,
            })
        }
        6 => {
            let parse = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
            Some(Rgb {
                r: parse(0..2)?,
                g: parse(2..4)?,
                b: parse(4..6)?,
            })
        }
        _ => None,
    }
}

/// The custom-property set for a configured primary color. An unparseable
/// color falls back to the stock palette instead of breaking the theme.
pub fn theme_variables(primary_color: &str) -> Vec<CssVariable> {
    let (hex, rgb) = match parse_hex(primary_color) {
        Some(rgb) => (primary_color.trim().to_string(), rgb),
        None => {
            warn!(%primary_color, "unparseable primary color, using fallback");
            let fallback = parse_hex(DEFAULT_PRIMARY_COLOR)
                .unwrap_or(Rgb { r: 139, g: 92, b: 246 });
            (DEFAULT_PRIMARY_COLOR.to_string(), fallback)
        }
    };
    vec![
        CssVariable {
            name: "--bf-primary",
            value: hex,
        },
        CssVariable {
            name: "--bf-primary-rgb",
            value: rgb.triplet(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#8b5cf6"), Some(Rgb { r: 139, g: 92, b: 246 }));
        assert_eq!(parse_hex("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(parse_hex("8b5cf6"), None);
        assert_eq!(parse_hex("#8b5cg6"), None);
    }

    #[test]
    fn derives_the_rgb_triplet_variable() {
        let vars = theme_variables("#8b5cf6");
        assert_eq!(vars[0].name, "--bf-primary");
        assert_eq!(vars[0].value, "#8b5cf6");
        assert_eq!(vars[1].name, "--bf-primary-rgb");
        assert_eq!(vars[1].value, "139, 92, 246");
    }

    #[test]
    fn invalid_color_falls_back() {
        let vars = theme_variables("tomato");
        assert_eq!(vars[0].value, "#8b5cf6");
        assert_eq!(vars[1].value, "139, 92, 246");
    }
}

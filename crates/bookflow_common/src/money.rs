// --- File: crates/bookflow_common/src/money.rs ---
//! Money primitives for the widget.
//!
//! All monetary amounts are carried as integer cents (`i64`). The booking
//! API exchanges decimal numbers, so conversion happens once at the wire
//! boundary via the [`cents`] serde module. Rounding is round-half-up to
//! whole cents everywhere a fractional amount can occur (percentage unit
//! prices, tax).

/// Round a fractional cent amount half-up to whole cents.
///
/// Amounts in this system are never negative, so half-up and
/// half-away-from-zero coincide.
pub fn round_half_up(value: f64) -> i64 {
    debug_assert!(value >= 0.0, "monetary amounts are non-negative");
    (value + 0.5).floor() as i64
}

/// Convert a decimal amount (e.g. `99.95`) into cents.
pub fn cents_from_decimal(value: f64) -> i64 {
    round_half_up(value * 100.0)
}

/// Format cents as a decimal string with two places, e.g. `16000` → `"160.00"`.
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

/// Serde adapter: decimal number on the wire, integer cents in memory.
pub mod cents {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(super::cents_from_decimal(value))
    }
}

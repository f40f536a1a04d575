// --- File: crates/bookflow_pricing/src/engine.rs ---
//! Price and duration derivation.
//!
//! The breakdown is a pure function of the base price, base duration, the
//! full selection state and the tax rate. It is recomputed on every mutation
//! (service change, item toggle, quantity change) and never cached, so the
//! displayed totals cannot drift from the selection.

use crate::selection::SelectionState;
use bookflow_common::models::{PricingModel, ServiceItem};
use bookflow_common::money::round_half_up;

/// Derived price/duration figures, in cents and minutes. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub items_subtotal: i64,
    pub tax: i64,
    pub total_duration_minutes: i64,
    pub grand_total: i64,
}

/// Resolve the unit price of an item against the base price of the selected
/// service.
///
/// `price_value` carries cents for fixed/hourly/per-unit items. For
/// percentage items it carries the percentage on the same cents scale
/// (`15.5` % on the wire is `1550`), so the unit price is
/// `base_price * price_value / 10_000`, rounded half-up.
pub fn resolved_unit_price(item: &ServiceItem, base_price: i64) -> i64 {
    match item.pricing {
        PricingModel::Percentage => {
            round_half_up(base_price as f64 * item.price_value as f64 / 10_000.0)
        }
        PricingModel::Fixed | PricingModel::Hourly | PricingModel::PerUnit => item.price_value,
        PricingModel::Free => 0,
    }
}

/// Compute the full breakdown from the current selection.
///
/// `tax_rate` is the collaborator-supplied fraction applied to
/// `base_price + items_subtotal`; pass `0.0` when the business does not
/// configure one.
pub fn compute_totals(
    base_price: i64,
    base_duration: i64,
    selection: &SelectionState,
    tax_rate: f64,
) -> PriceBreakdown {
    let mut items_subtotal = 0i64;
    let mut extra_duration = 0i64;
    for (_, entry) in selection.entries() {
        let quantity = i64::from(entry.quantity);
        items_subtotal += entry.unit_price * quantity;
        extra_duration += entry.duration_minutes * quantity;
    }

    let tax = if tax_rate > 0.0 {
        round_half_up((base_price + items_subtotal) as f64 * tax_rate)
    } else {
        0
    };

    PriceBreakdown {
        base_price,
        items_subtotal,
        tax,
        total_duration_minutes: base_duration + extra_duration,
        grand_total: base_price + items_subtotal + tax,
    }
}

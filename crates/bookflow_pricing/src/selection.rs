// --- File: crates/bookflow_pricing/src/selection.rs ---
//! The set of service items the user has picked for the selected service.
//!
//! Invariants maintained here, not in the UI layer:
//! - every required item of the loaded catalog is present and cannot be
//!   removed;
//! - quantities stay within `[1, max_quantity]`;
//! - a deselected item is fully removed, so it contributes zero to totals.

use crate::engine::resolved_unit_price;
use bookflow_common::models::{FieldKind, FieldValue, ServiceItem};
use std::collections::BTreeMap;

/// One selected item: its quantity, the unit price resolved against the
/// current base price, and the raw field input carried into the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub quantity: u32,
    pub unit_price: i64,
    pub duration_minutes: i64,
    pub required: bool,
    pub value: FieldValue,
}

/// Mapping of service-item id to its selection entry. Ordered so rendering
/// and payload serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    entries: BTreeMap<String, SelectedItem>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the selection with a freshly loaded catalog: entries for
    /// items no longer in the catalog are dropped and required items are
    /// auto-selected.
    pub fn sync_catalog(&mut self, items: &[ServiceItem], base_price: i64) {
        self.entries
            .retain(|id, _| items.iter().any(|item| &item.id == id));
        for item in items {
            if item.required && !self.entries.contains_key(&item.id) {
                self.insert(item, base_price);
            }
        }
    }

    /// Toggle a non-required item in or out of the selection. Toggling a
    /// required item is a no-op; returns whether anything changed.
    pub fn toggle(&mut self, item: &ServiceItem, base_price: i64) -> bool {
        if self.entries.contains_key(&item.id) {
            if item.required {
                tracing::debug!(item = %item.id, "ignoring toggle of required item");
                return false;
            }
            self.entries.remove(&item.id);
            true
        } else {
            self.insert(item, base_price);
            true
        }
    }

    /// Set the quantity for an item, clamped to `[1, max_quantity]`.
    /// Selects the item first if it was not selected yet.
    pub fn set_quantity(&mut self, item: &ServiceItem, base_price: i64, quantity: u32) {
        if !self.entries.contains_key(&item.id) {
            self.insert(item, base_price);
        }
        let clamped = quantity.clamp(1, item.max_quantity.max(1));
        if let Some(entry) = self.entries.get_mut(&item.id) {
            entry.quantity = clamped;
            if numeric_input(item.kind) {
                entry.value = FieldValue::text(clamped.to_string());
            }
        }
    }

    /// Record the raw field input for an item. For numeric inputs the
    /// quantity follows the value, mirroring how the widget form behaves.
    pub fn set_value(&mut self, item: &ServiceItem, base_price: i64, value: FieldValue) {
        if !self.entries.contains_key(&item.id) {
            self.insert(item, base_price);
        }
        if numeric_input(item.kind) {
            if let Some(parsed) = value.as_text().and_then(|t| t.trim().parse::<f64>().ok()) {
                let quantity = (parsed as i64).clamp(1, i64::from(item.max_quantity.max(1)));
                if let Some(entry) = self.entries.get_mut(&item.id) {
                    entry.quantity = quantity as u32;
                    entry.value = FieldValue::text(quantity.to_string());
                }
                return;
            }
        }
        if let Some(entry) = self.entries.get_mut(&item.id) {
            entry.value = value;
        }
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&SelectedItem> {
        self.entries.get(item_id)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &SelectedItem)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn insert(&mut self, item: &ServiceItem, base_price: i64) {
        let value = if numeric_input(item.kind) {
            FieldValue::text("1")
        } else {
            FieldValue::default()
        };
        self.entries.insert(
            item.id.clone(),
            SelectedItem {
                quantity: 1,
                unit_price: resolved_unit_price(item, base_price),
                duration_minutes: item.duration_minutes,
                required: item.required,
                value,
            },
        );
    }
}

fn numeric_input(kind: FieldKind) -> bool {
    matches!(kind, FieldKind::Number)
}

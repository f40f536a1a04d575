// --- File: crates/bookflow_flow/src/draft.rs ---
//! The in-progress booking being assembled across steps.

use bookflow_common::models::{FieldValue, LocationKind};
use bookflow_pricing::SelectionState;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// The single mutable aggregate of the widget. Owned exclusively by the
/// step flow controller; every other component receives read snapshots.
/// Created empty at flow start and discarded on successful submission or
/// host teardown; nothing survives a page reload.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    /// Custom-field values keyed by field slug.
    pub custom_fields: BTreeMap<String, FieldValue>,
    pub service_id: Option<String>,
    pub selection: SelectionState,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    /// Derived: start time plus total duration. Never edited directly.
    pub end_time: Option<NaiveTime>,
    pub location_kind: LocationKind,
    pub location_details: String,
    pub staff_member_id: Option<String>,
    pub notes: String,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom_value(&self, slug: &str) -> Option<&FieldValue> {
        self.custom_fields.get(slug)
    }

    /// Keep the derived end time consistent with the start time and the
    /// current total duration. Times wrap at midnight, matching the
    /// wall-clock semantics of the wire format.
    pub(crate) fn recompute_end_time(&mut self, total_duration_minutes: i64) {
        self.end_time = self
            .start_time
            .map(|start| start + Duration::minutes(total_duration_minutes));
    }
}

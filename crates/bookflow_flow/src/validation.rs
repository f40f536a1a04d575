// --- File: crates/bookflow_flow/src/validation.rs ---
//! Per-step required-field validation.
//!
//! `next` from a step is permitted only if every required field rendered in
//! that step is non-empty; offenders are reported as stable field keys the
//! view layer turns into invalid markers. Validation never touches the
//! network.

use crate::draft::BookingDraft;
use crate::steps::Step;
use bookflow_common::models::{FieldKind, FieldValue, ServiceItem, WidgetConfig};

/// Stable identifier of a form field, e.g. `client_email`, `custom_referral`
/// or `item_<id>`.
pub type FieldKey = String;

pub fn custom_field_key(slug: &str) -> FieldKey {
    format!("custom_{slug}")
}

pub fn item_field_key(item_id: &str) -> FieldKey {
    format!("item_{item_id}")
}

/// The required fields of `step` that are currently empty, in render order.
///
/// `items` is the loaded catalog for the selected service, if any; required
/// items can only be validated once their definitions are known.
pub fn missing_fields(
    step: Step,
    draft: &BookingDraft,
    config: &WidgetConfig,
    items: Option<&[ServiceItem]>,
) -> Vec<FieldKey> {
    match step {
        Step::ClientInfo => client_info_missing(draft, config),
        Step::ServiceSelection => service_missing(draft),
        Step::ServiceItems => items_missing(draft, items),
        Step::DateTime => schedule_missing(draft),
        // Final drift defense: everything gated earlier must still hold.
        Step::Confirm => {
            let mut missing = client_info_missing(draft, config);
            missing.extend(service_missing(draft));
            missing.extend(items_missing(draft, items));
            missing.extend(schedule_missing(draft));
            missing
        }
    }
}

fn client_info_missing(draft: &BookingDraft, config: &WidgetConfig) -> Vec<FieldKey> {
    let mut missing = Vec::new();
    if draft.client_name.trim().is_empty() {
        missing.push("client_name".to_string());
    }
    if draft.client_email.trim().is_empty() {
        missing.push("client_email".to_string());
    }
    if draft.client_phone.trim().is_empty() {
        missing.push("client_phone".to_string());
    }
    for field in config.custom_fields.iter().filter(|field| field.required) {
        if !value_satisfies(field.kind, draft.custom_value(&field.slug)) {
            missing.push(custom_field_key(&field.slug));
        }
    }
    missing
}

fn service_missing(draft: &BookingDraft) -> Vec<FieldKey> {
    if draft.service_id.is_none() {
        vec!["service".to_string()]
    } else {
        Vec::new()
    }
}

fn items_missing(draft: &BookingDraft, items: Option<&[ServiceItem]>) -> Vec<FieldKey> {
    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.required)
        .filter(|item| {
            let value = draft.selection.get(&item.id).map(|entry| &entry.value);
            !value_satisfies(item.kind, value)
        })
        .map(|item| item_field_key(&item.id))
        .collect()
}

fn schedule_missing(draft: &BookingDraft) -> Vec<FieldKey> {
    let mut missing = Vec::new();
    if draft.date.is_none() {
        missing.push("date".to_string());
    }
    if draft.start_time.is_none() {
        missing.push("start_time".to_string());
    }
    if draft.staff_member_id.is_none() {
        missing.push("staff_member".to_string());
    }
    missing
}

/// Whether `value` counts as filled for a field of the given kind. The
/// exhaustive dispatch keeps new kinds a compile-time decision.
fn value_satisfies(kind: FieldKind, value: Option<&FieldValue>) -> bool {
    match kind {
        // An unchecked checkbox is a valid answer to a boolean field.
        FieldKind::Boolean => true,
        FieldKind::Text | FieldKind::Textarea | FieldKind::Select | FieldKind::Date => {
            value.is_some_and(|value| !value.is_empty())
        }
        FieldKind::Number => value
            .and_then(FieldValue::as_text)
            .is_some_and(|text| text.trim().parse::<f64>().is_ok()),
    }
}

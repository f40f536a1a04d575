// --- File: crates/bookflow_flow/src/submit.rs ---
//! Final payload assembly for the booking submission.
//!
//! Every field gated by earlier steps is re-validated here as a defense
//! against state drift; a failure reports the offending field keys and
//! nothing is sent to the network.

use crate::draft::BookingDraft;
use crate::steps::Step;
use crate::validation::{self, FieldKey};
use bookflow_common::models::{
    CreateBookingRequest, ServiceItem, ServiceItemSelection, WidgetConfig,
};
use std::collections::BTreeMap;

/// Serialize the draft into the creation payload, re-checking every
/// required field first. The end time is derived state; its absence means
/// the schedule is incomplete and is reported like any other missing field.
pub fn build_payload(
    draft: &BookingDraft,
    config: &WidgetConfig,
    items: Option<&[ServiceItem]>,
) -> Result<CreateBookingRequest, Vec<FieldKey>> {
    let mut missing = validation::missing_fields(Step::Confirm, draft, config, items);

    let schedule = match (draft.service_id.clone(), draft.date, draft.start_time, draft.end_time) {
        (Some(service_id), Some(date), Some(start), Some(end)) => {
            Some((service_id, date, start, end))
        }
        _ => {
            if draft.end_time.is_none() && !missing.iter().any(|key| key == "start_time") {
                missing.push("start_time".to_string());
            }
            None
        }
    };
    let staff_member_id = draft.staff_member_id.clone();

    let (Some((service_id, date, start_time, end_time)), Some(staff_member_id), true) =
        (schedule, staff_member_id, missing.is_empty())
    else {
        missing.dedup();
        return Err(missing);
    };

    let custom_fields: BTreeMap<_, _> = config
        .custom_fields
        .iter()
        .filter_map(|field| {
            draft
                .custom_value(&field.slug)
                .map(|value| (field.slug.clone(), value.clone()))
        })
        .collect();

    let service_items: BTreeMap<_, _> = draft
        .selection
        .entries()
        .map(|(id, entry)| {
            (
                id.clone(),
                ServiceItemSelection {
                    value: entry.value.clone(),
                    quantity: entry.quantity,
                },
            )
        })
        .collect();

    Ok(CreateBookingRequest {
        service_type: service_id,
        booking_date: date,
        start_time,
        end_time,
        location_type: draft.location_kind,
        location_details: draft.location_details.clone(),
        notes: draft.notes.clone(),
        staff_member_id,
        client_name: draft.client_name.trim().to_string(),
        client_email: draft.client_email.trim().to_string(),
        client_phone: draft.client_phone.trim().to_string(),
        custom_fields,
        service_items,
    })
}

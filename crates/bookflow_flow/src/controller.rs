// --- File: crates/bookflow_flow/src/controller.rs ---
//! The step flow state machine.
//!
//! The controller owns the booking draft and is the only writer to it.
//! Interaction is modeled as events: `apply` mutates state synchronously and
//! returns the asynchronous work (effects) the runtime must perform;
//! completions come back as events too. This keeps the whole flow
//! deterministic and lets tests drive arbitrary interleavings, including the
//! stale-response cases.

use crate::draft::BookingDraft;
use crate::steps::Step;
use crate::submit;
use crate::validation::{self, FieldKey};
use bookflow_common::models::{
    AvailabilityQuery, AvailabilityResult, BookingConfirmation, CreateBookingRequest, FieldValue,
    LocationKind, Service, ServiceItem, ServiceItemCatalog, WidgetConfig,
};
use bookflow_pricing::{compute_totals, PriceBreakdown};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;
use tracing::debug;

// --- Events and effects ---

/// Everything that can happen to the flow: user interaction and the
/// completions of previously requested effects.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    ClientNameChanged(String),
    ClientEmailChanged(String),
    ClientPhoneChanged(String),
    CustomFieldChanged { slug: String, value: FieldValue },
    ServiceSelected { service_id: String },
    ItemsLoaded { catalog: ServiceItemCatalog },
    ItemsLoadFailed { service_id: String, message: String },
    ItemToggled { item_id: String },
    ItemQuantityChanged { item_id: String, quantity: u32 },
    ItemValueChanged { item_id: String, value: FieldValue },
    DateChanged(Option<NaiveDate>),
    StartTimeChanged(Option<NaiveTime>),
    LocationKindChanged(LocationKind),
    LocationDetailsChanged(String),
    NotesChanged(String),
    AvailabilityChecked {
        query: AvailabilityQuery,
        result: AvailabilityResult,
    },
    AvailabilityCheckFailed {
        query: AvailabilityQuery,
        message: String,
    },
    AlternateSlotPicked { index: usize },
    StaffSelected { staff_id: String },
    NextStep,
    PrevStep,
    Submit,
    SubmissionSucceeded { confirmation: BookingConfirmation },
    SubmissionFailed { message: String },
    ErrorDismissed,
}

/// Asynchronous work requested by the controller, executed by the runtime
/// against the injected services.
#[derive(Debug, Clone)]
pub enum Effect {
    LoadServiceItems { service_id: String },
    CheckAvailability { query: AvailabilityQuery },
    SubmitBooking { request: CreateBookingRequest },
}

// --- Controller state ---

#[derive(Debug, Clone)]
pub enum FlowPhase {
    InProgress(Step),
    /// Terminal: the booking was created and re-submission is disabled.
    Completed(BookingConfirmation),
}

/// Catalog state for the currently selected service.
#[derive(Debug, Clone)]
pub enum ItemsState {
    NotLoaded,
    Loading { service_id: String },
    Loaded { service_id: String, items: Vec<ServiceItem> },
    Failed { service_id: String, message: String },
}

/// Availability state for the current date/time/duration/service tuple.
#[derive(Debug, Clone)]
pub enum AvailabilityStatus {
    NotRequested,
    Checking { query: AvailabilityQuery },
    Resolved {
        query: AvailabilityQuery,
        result: AvailabilityResult,
    },
    Failed { message: String },
}

pub struct StepFlowController {
    config: WidgetConfig,
    phase: FlowPhase,
    draft: BookingDraft,
    items: ItemsState,
    availability: AvailabilityStatus,
    invalid_fields: BTreeSet<FieldKey>,
    error_banner: Option<String>,
    submitting: bool,
}

impl StepFlowController {
    /// Start an empty flow at the first step.
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            phase: FlowPhase::InProgress(Step::ClientInfo),
            draft: BookingDraft::new(),
            items: ItemsState::NotLoaded,
            availability: AvailabilityStatus::NotRequested,
            invalid_fields: BTreeSet::new(),
            error_banner: None,
            submitting: false,
        }
    }

    /// Apply one event, returning the effects the runtime must run.
    pub fn apply(&mut self, event: FlowEvent) -> Vec<Effect> {
        if matches!(self.phase, FlowPhase::Completed(_)) {
            // The flow is over; only the error banner stays interactive.
            if matches!(event, FlowEvent::ErrorDismissed) {
                self.error_banner = None;
            }
            return Vec::new();
        }

        let mut effects = Vec::new();
        match event {
            FlowEvent::ClientNameChanged(value) => {
                self.draft.client_name = value;
                self.clear_invalid("client_name");
            }
            FlowEvent::ClientEmailChanged(value) => {
                self.draft.client_email = value;
                self.clear_invalid("client_email");
            }
            FlowEvent::ClientPhoneChanged(value) => {
                self.draft.client_phone = value;
                self.clear_invalid("client_phone");
            }
            FlowEvent::CustomFieldChanged { slug, value } => {
                self.clear_invalid(&validation::custom_field_key(&slug));
                self.draft.custom_fields.insert(slug, value);
            }
            FlowEvent::ServiceSelected { service_id } => {
                self.select_service(service_id, &mut effects);
            }
            FlowEvent::ItemsLoaded { catalog } => {
                self.items_loaded(catalog, &mut effects);
            }
            FlowEvent::ItemsLoadFailed { service_id, message } => {
                if self.draft.service_id.as_deref() == Some(service_id.as_str()) {
                    self.items = ItemsState::Failed {
                        service_id,
                        message: message.clone(),
                    };
                    self.error_banner = Some(message);
                } else {
                    debug!(%service_id, "discarding failure of stale service-item fetch");
                }
            }
            FlowEvent::ItemToggled { item_id } => {
                if let Some(item) = self.find_item(&item_id).cloned() {
                    let base_price = self.base_price();
                    if self.draft.selection.toggle(&item, base_price) {
                        self.clear_invalid(&validation::item_field_key(&item.id));
                        self.reconcile_schedule(&mut effects);
                    }
                }
            }
            FlowEvent::ItemQuantityChanged { item_id, quantity } => {
                if let Some(item) = self.find_item(&item_id).cloned() {
                    let base_price = self.base_price();
                    self.draft.selection.set_quantity(&item, base_price, quantity);
                    self.reconcile_schedule(&mut effects);
                }
            }
            FlowEvent::ItemValueChanged { item_id, value } => {
                if let Some(item) = self.find_item(&item_id).cloned() {
                    let base_price = self.base_price();
                    self.draft.selection.set_value(&item, base_price, value);
                    self.clear_invalid(&validation::item_field_key(&item.id));
                    self.reconcile_schedule(&mut effects);
                }
            }
            FlowEvent::DateChanged(date) => {
                self.draft.date = date;
                self.clear_invalid("date");
                self.reconcile_schedule(&mut effects);
            }
            FlowEvent::StartTimeChanged(start_time) => {
                self.draft.start_time = start_time;
                self.clear_invalid("start_time");
                self.reconcile_schedule(&mut effects);
            }
            FlowEvent::LocationKindChanged(kind) => {
                self.draft.location_kind = kind;
            }
            FlowEvent::LocationDetailsChanged(details) => {
                self.draft.location_details = details;
            }
            FlowEvent::NotesChanged(notes) => {
                self.draft.notes = notes;
            }
            FlowEvent::AvailabilityChecked { query, result } => {
                self.availability_checked(query, result, &mut effects);
            }
            FlowEvent::AvailabilityCheckFailed { query, message } => {
                debug!(?query, %message, "availability check failed");
                self.availability = AvailabilityStatus::Failed { message: message.clone() };
                self.error_banner = Some(message);
            }
            FlowEvent::AlternateSlotPicked { index } => {
                self.pick_alternate_slot(index, &mut effects);
            }
            FlowEvent::StaffSelected { staff_id } => {
                self.select_staff(staff_id);
            }
            FlowEvent::NextStep => self.next_step(),
            FlowEvent::PrevStep => self.prev_step(),
            FlowEvent::Submit => self.submit(&mut effects),
            FlowEvent::SubmissionSucceeded { confirmation } => {
                self.submitting = false;
                self.error_banner = None;
                debug!(booking_id = %confirmation.booking_id, "booking created");
                self.phase = FlowPhase::Completed(confirmation);
                // The draft's lifecycle ends with a successful submission.
                self.draft = BookingDraft::new();
                self.items = ItemsState::NotLoaded;
                self.availability = AvailabilityStatus::NotRequested;
            }
            FlowEvent::SubmissionFailed { message } => {
                self.submitting = false;
                // Draft is preserved so the user can correct and resubmit.
                self.error_banner = Some(message);
            }
            FlowEvent::ErrorDismissed => {
                self.error_banner = None;
            }
        }
        effects
    }

    /// Discard the draft, e.g. when the host tears the widget down.
    pub fn reset(&mut self) {
        self.phase = FlowPhase::InProgress(Step::ClientInfo);
        self.draft = BookingDraft::new();
        self.items = ItemsState::NotLoaded;
        self.availability = AvailabilityStatus::NotRequested;
        self.invalid_fields.clear();
        self.error_banner = None;
        self.submitting = false;
    }

    // --- Event handling ---

    fn select_service(&mut self, service_id: String, effects: &mut Vec<Effect>) {
        if self.draft.service_id.as_deref() == Some(service_id.as_str()) {
            return;
        }
        if self.config.service(&service_id).is_none() {
            debug!(%service_id, "ignoring selection of unknown service");
            return;
        }
        debug!(%service_id, "service selected");
        self.draft.service_id = Some(service_id.clone());
        self.draft.selection.clear();
        self.clear_invalid("service");
        self.items = ItemsState::Loading {
            service_id: service_id.clone(),
        };
        effects.push(Effect::LoadServiceItems { service_id });
        self.reconcile_schedule(effects);
    }

    fn items_loaded(&mut self, catalog: ServiceItemCatalog, effects: &mut Vec<Effect>) {
        // Last selection wins: a response for a service the user has moved
        // away from is dropped on arrival.
        if self.draft.service_id.as_deref() != Some(catalog.service_id.as_str()) {
            debug!(
                stale = %catalog.service_id,
                current = ?self.draft.service_id,
                "discarding stale service-item response"
            );
            return;
        }
        let base_price = self.base_price();
        self.draft.selection.sync_catalog(&catalog.items, base_price);
        self.items = ItemsState::Loaded {
            service_id: catalog.service_id,
            items: catalog.items,
        };
        self.reconcile_schedule(effects);
    }

    fn availability_checked(
        &mut self,
        query: AvailabilityQuery,
        result: AvailabilityResult,
        effects: &mut Vec<Effect>,
    ) {
        match self.desired_availability_query() {
            Some(desired) if desired == query => {
                if !result.is_available {
                    self.draft.staff_member_id = None;
                }
                self.availability = AvailabilityStatus::Resolved { query, result };
            }
            Some(desired) => {
                // The schedule moved while the check was in flight. Discard
                // and issue exactly one follow-up for the current tuple.
                debug!("discarding stale availability result");
                self.availability = AvailabilityStatus::Checking {
                    query: desired.clone(),
                };
                effects.push(Effect::CheckAvailability { query: desired });
            }
            None => {
                self.availability = AvailabilityStatus::NotRequested;
            }
        }
    }

    fn pick_alternate_slot(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let slot = match &self.availability {
            AvailabilityStatus::Resolved { result, .. } if !result.is_available => {
                result.alternate_slots.get(index).cloned()
            }
            _ => None,
        };
        let Some(slot) = slot else {
            debug!(index, "ignoring alternate-slot pick with no pending denial");
            return;
        };
        self.draft.date = Some(slot.date);
        self.draft.start_time = Some(slot.start_time);
        // One fresh check for the new tuple; a success terminates the cycle.
        self.reconcile_schedule(effects);
    }

    fn select_staff(&mut self, staff_id: String) {
        let available = match &self.availability {
            AvailabilityStatus::Resolved { result, .. } if result.is_available => result
                .available_staff
                .iter()
                .any(|staff| staff.id == staff_id),
            _ => false,
        };
        if available {
            self.draft.staff_member_id = Some(staff_id);
            self.clear_invalid("staff_member");
        } else {
            debug!(%staff_id, "ignoring staff selection without a confirmed slot");
        }
    }

    fn next_step(&mut self) {
        let FlowPhase::InProgress(step) = &self.phase else {
            return;
        };
        let step = *step;
        let missing =
            validation::missing_fields(step, &self.draft, &self.config, self.loaded_items());
        if missing.is_empty() {
            self.invalid_fields.clear();
            if let Some(next) = step.next() {
                debug!(from = ?step, to = ?next, "step forward");
                self.phase = FlowPhase::InProgress(next);
            }
        } else {
            debug!(?step, ?missing, "blocking step transition");
            self.invalid_fields = missing.into_iter().collect();
        }
    }

    fn prev_step(&mut self) {
        let FlowPhase::InProgress(step) = &self.phase else {
            return;
        };
        let step = *step;
        if let Some(prev) = step.prev() {
            self.invalid_fields.clear();
            self.phase = FlowPhase::InProgress(prev);
        }
    }

    fn submit(&mut self, effects: &mut Vec<Effect>) {
        if !matches!(self.phase, FlowPhase::InProgress(Step::Confirm)) || self.submitting {
            return;
        }
        match submit::build_payload(&self.draft, &self.config, self.loaded_items()) {
            Ok(request) => {
                self.submitting = true;
                self.error_banner = None;
                effects.push(Effect::SubmitBooking { request });
            }
            Err(missing) => {
                debug!(?missing, "submission blocked by local validation");
                self.invalid_fields = missing.into_iter().collect();
                self.error_banner =
                    Some("Please complete the highlighted fields before booking.".to_string());
            }
        }
    }

    // --- Derived state ---

    /// Recompute the derived schedule pieces after any mutation that can
    /// change them: the end time follows the total duration, and the
    /// availability state follows the date/time/duration/service tuple.
    fn reconcile_schedule(&mut self, effects: &mut Vec<Effect>) {
        let total_duration = self.breakdown().total_duration_minutes;
        self.draft.recompute_end_time(total_duration);
        match self.desired_availability_query() {
            None => {
                self.availability = AvailabilityStatus::NotRequested;
                self.draft.staff_member_id = None;
            }
            Some(desired) => match &self.availability {
                AvailabilityStatus::Resolved { query, .. } if *query == desired => {}
                AvailabilityStatus::Checking { .. } => {
                    // Never overlap checks; the resolution handler reconciles.
                    self.draft.staff_member_id = None;
                }
                _ => {
                    self.draft.staff_member_id = None;
                    self.availability = AvailabilityStatus::Checking {
                        query: desired.clone(),
                    };
                    effects.push(Effect::CheckAvailability { query: desired });
                }
            },
        }
    }

    /// The availability tuple implied by the current draft, if complete.
    fn desired_availability_query(&self) -> Option<AvailabilityQuery> {
        let date = self.draft.date?;
        let start_time = self.draft.start_time?;
        let service_id = self.draft.service_id.clone()?;
        Some(AvailabilityQuery {
            date,
            start_time,
            duration_minutes: self.breakdown().total_duration_minutes,
            service_id,
        })
    }

    /// The price/duration breakdown for the current selection. Always
    /// recomputed from the full selection state, never cached.
    pub fn breakdown(&self) -> PriceBreakdown {
        let (base_price, base_duration) = self
            .selected_service()
            .map(|service| (service.price, service.duration))
            .unwrap_or((0, 0));
        compute_totals(
            base_price,
            base_duration,
            &self.draft.selection,
            self.config.tax_rate(),
        )
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.draft
            .service_id
            .as_deref()
            .and_then(|id| self.config.service(id))
    }

    pub(crate) fn loaded_items(&self) -> Option<&[ServiceItem]> {
        match &self.items {
            ItemsState::Loaded { items, .. } => Some(items),
            _ => None,
        }
    }

    fn find_item(&self, item_id: &str) -> Option<&ServiceItem> {
        self.loaded_items()?.iter().find(|item| item.id == item_id)
    }

    fn base_price(&self) -> i64 {
        self.selected_service().map(|s| s.price).unwrap_or(0)
    }

    fn clear_invalid(&mut self, key: &str) {
        self.invalid_fields.remove(key);
    }

    // --- Accessors for the view layer ---

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn step(&self) -> Option<Step> {
        match self.phase {
            FlowPhase::InProgress(step) => Some(step),
            FlowPhase::Completed(_) => None,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn items_state(&self) -> &ItemsState {
        &self.items
    }

    pub fn availability(&self) -> &AvailabilityStatus {
        &self.availability
    }

    pub fn invalid_fields(&self) -> &BTreeSet<FieldKey> {
        &self.invalid_fields
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

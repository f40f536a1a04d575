// --- File: crates/bookflow_flow/src/view.rs ---
//! Render models for the widget.
//!
//! `render` is a pure function of the controller state: the host (or the
//! embedding layer) turns these view structures into DOM, TUI or test
//! assertions. There is no hidden state here; re-rendering after every
//! applied event is the contract.

use crate::controller::{AvailabilityStatus, FlowPhase, ItemsState, StepFlowController};
use crate::steps::Step;
use crate::validation;
use bookflow_common::models::{
    FieldKind, FieldValue, LocationKind, StaffMember, TimeSlot,
};
use bookflow_common::money::format_cents;

/// One full frame of the widget.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub step_indicator: Vec<StepIndicator>,
    pub body: ViewBody,
    pub summary: SummaryPanel,
    pub error_banner: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone)]
pub struct StepIndicator {
    pub title: &'static str,
    pub active: bool,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub enum ViewBody {
    Form(StepView),
    /// Terminal confirmation; the form is gone and re-submission disabled.
    Confirmation { booking_id: String, message: String },
}

#[derive(Debug, Clone)]
pub enum StepView {
    ClientInfo { fields: Vec<FieldView> },
    ServiceSelection {
        services: Vec<ServiceCard>,
        selected: Option<String>,
        invalid: bool,
    },
    ServiceItems(ItemsView),
    DateTime(Box<DateTimeView>),
    Confirm(ConfirmView),
}

/// An input control, derived exhaustively from the field kind so a new
/// kind cannot be rendered by accident.
#[derive(Debug, Clone)]
pub enum FieldControl {
    TextInput,
    NumberInput,
    SelectInput { options: Vec<String> },
    Checkbox,
    TextArea,
    DatePicker,
}

impl FieldControl {
    pub fn for_kind(kind: FieldKind, options: &[String]) -> Self {
        match kind {
            FieldKind::Text => FieldControl::TextInput,
            FieldKind::Number => FieldControl::NumberInput,
            FieldKind::Select => FieldControl::SelectInput {
                options: options.to_vec(),
            },
            FieldKind::Boolean => FieldControl::Checkbox,
            FieldKind::Textarea => FieldControl::TextArea,
            FieldKind::Date => FieldControl::DatePicker,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub control: FieldControl,
    pub value: FieldValue,
    pub required: bool,
    pub invalid: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServiceCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_display: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone)]
pub enum ItemsView {
    /// Shown when the user reaches the add-ons step without a service.
    NoServiceSelected { message: &'static str },
    Loading,
    Failed { message: String },
    Catalog { items: Vec<ItemRow> },
}

#[derive(Debug, Clone)]
pub struct ItemRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub selected: bool,
    /// Required rows render a non-interactive checkbox.
    pub locked: bool,
    pub quantity: u32,
    pub max_quantity: u32,
    pub unit_price_display: String,
    pub control: FieldControl,
    pub value: FieldValue,
    pub invalid: bool,
}

#[derive(Debug, Clone)]
pub struct DateTimeView {
    pub date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    /// Derived; rendered read-only.
    pub end_time: Option<chrono::NaiveTime>,
    pub date_invalid: bool,
    pub start_time_invalid: bool,
    pub staff_invalid: bool,
    pub location_kind: LocationKind,
    pub location_details: String,
    pub availability: AvailabilityView,
}

#[derive(Debug, Clone)]
pub enum AvailabilityView {
    NotRequested,
    Checking,
    Available {
        staff: Vec<StaffMember>,
        selected_staff: Option<String>,
    },
    Unavailable {
        reason: Option<String>,
        alternates: Vec<SlotOption>,
    },
    Failed { message: String },
}

/// A selectable shortcut for an alternate slot.
#[derive(Debug, Clone)]
pub struct SlotOption {
    pub index: usize,
    pub label: String,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone)]
pub struct ConfirmView {
    pub notes: String,
}

/// The always-visible summary panel, rebuilt from the draft and a fresh
/// price breakdown on every render.
#[derive(Debug, Clone)]
pub struct SummaryPanel {
    pub service_name: Option<String>,
    pub date_display: Option<String>,
    pub time_display: Option<String>,
    pub location_display: String,
    pub lines: Vec<SummaryLine>,
    pub base_price_display: Option<String>,
    pub tax_display: Option<String>,
    pub total_display: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct SummaryLine {
    pub label: String,
    pub quantity: u32,
    pub amount_display: String,
}

/// Produce one frame from the current controller state.
pub fn render(controller: &StepFlowController) -> WidgetView {
    let body = match controller.phase() {
        FlowPhase::Completed(confirmation) => ViewBody::Confirmation {
            booking_id: confirmation.booking_id.clone(),
            message: confirmation.message.clone(),
        },
        FlowPhase::InProgress(step) => ViewBody::Form(render_step(*step, controller)),
    };

    WidgetView {
        step_indicator: step_indicator(controller),
        body,
        summary: summary_panel(controller),
        error_banner: controller.error_banner().map(str::to_string),
        submitting: controller.is_submitting(),
    }
}

fn step_indicator(controller: &StepFlowController) -> Vec<StepIndicator> {
    let active_index = controller.step().map(Step::index);
    Step::ALL
        .iter()
        .map(|step| StepIndicator {
            title: step.title(),
            active: active_index == Some(step.index()),
            completed: match active_index {
                Some(active) => step.index() < active,
                // Terminal phase: the whole flow is behind us.
                None => true,
            },
        })
        .collect()
}

fn render_step(step: Step, controller: &StepFlowController) -> StepView {
    match step {
        Step::ClientInfo => StepView::ClientInfo {
            fields: client_info_fields(controller),
        },
        Step::ServiceSelection => StepView::ServiceSelection {
            services: controller
                .config()
                .services
                .iter()
                .map(|service| ServiceCard {
                    id: service.id.clone(),
                    name: service.name.clone(),
                    description: service.description.clone(),
                    price_display: format_cents(service.price),
                    duration_minutes: service.duration,
                })
                .collect(),
            selected: controller.draft().service_id.clone(),
            invalid: controller.invalid_fields().contains("service"),
        },
        Step::ServiceItems => StepView::ServiceItems(items_view(controller)),
        Step::DateTime => StepView::DateTime(Box::new(date_time_view(controller))),
        Step::Confirm => StepView::Confirm(ConfirmView {
            notes: controller.draft().notes.clone(),
        }),
    }
}

fn client_info_fields(controller: &StepFlowController) -> Vec<FieldView> {
    let draft = controller.draft();
    let invalid = controller.invalid_fields();
    let mut fields = vec![
        FieldView {
            key: "client_name".to_string(),
            label: "Name".to_string(),
            control: FieldControl::TextInput,
            value: FieldValue::text(draft.client_name.clone()),
            required: true,
            invalid: invalid.contains("client_name"),
            placeholder: None,
            help_text: None,
        },
        FieldView {
            key: "client_email".to_string(),
            label: "Email".to_string(),
            control: FieldControl::TextInput,
            value: FieldValue::text(draft.client_email.clone()),
            required: true,
            invalid: invalid.contains("client_email"),
            placeholder: None,
            help_text: None,
        },
        FieldView {
            key: "client_phone".to_string(),
            label: "Phone".to_string(),
            control: FieldControl::TextInput,
            value: FieldValue::text(draft.client_phone.clone()),
            required: true,
            invalid: invalid.contains("client_phone"),
            placeholder: None,
            help_text: None,
        },
    ];
    for field in &controller.config().custom_fields {
        let key = validation::custom_field_key(&field.slug);
        fields.push(FieldView {
            invalid: invalid.contains(&key),
            key,
            label: field.name.clone(),
            control: FieldControl::for_kind(field.kind, &field.options),
            value: draft
                .custom_value(&field.slug)
                .cloned()
                .unwrap_or_default(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
        });
    }
    fields
}

fn items_view(controller: &StepFlowController) -> ItemsView {
    if controller.draft().service_id.is_none() {
        return ItemsView::NoServiceSelected {
            message: "Choose a service first to see its add-ons.",
        };
    }
    match controller.items_state() {
        ItemsState::NotLoaded | ItemsState::Loading { .. } => ItemsView::Loading,
        ItemsState::Failed { message, .. } => ItemsView::Failed {
            message: message.clone(),
        },
        ItemsState::Loaded { items, .. } => {
            let draft = controller.draft();
            let invalid = controller.invalid_fields();
            ItemsView::Catalog {
                items: items
                    .iter()
                    .map(|item| {
                        let entry = draft.selection.get(&item.id);
                        let key = validation::item_field_key(&item.id);
                        ItemRow {
                            id: item.id.clone(),
                            name: item.name.clone(),
                            description: item.description.clone(),
                            selected: entry.is_some(),
                            locked: item.required,
                            quantity: entry.map(|e| e.quantity).unwrap_or(1),
                            max_quantity: item.max_quantity,
                            unit_price_display: format_cents(
                                entry.map(|e| e.unit_price).unwrap_or_else(|| {
                                    bookflow_pricing::resolved_unit_price(
                                        item,
                                        controller
                                            .selected_service()
                                            .map(|s| s.price)
                                            .unwrap_or(0),
                                    )
                                }),
                            ),
                            control: FieldControl::for_kind(item.kind, &[]),
                            value: entry.map(|e| e.value.clone()).unwrap_or_default(),
                            invalid: invalid.contains(&key),
                        }
                    })
                    .collect(),
            }
        }
    }
}

fn date_time_view(controller: &StepFlowController) -> DateTimeView {
    let draft = controller.draft();
    let invalid = controller.invalid_fields();
    let availability = match controller.availability() {
        AvailabilityStatus::NotRequested => AvailabilityView::NotRequested,
        AvailabilityStatus::Checking { .. } => AvailabilityView::Checking,
        AvailabilityStatus::Failed { message } => AvailabilityView::Failed {
            message: message.clone(),
        },
        AvailabilityStatus::Resolved { result, .. } => {
            if result.is_available {
                AvailabilityView::Available {
                    staff: result.available_staff.clone(),
                    selected_staff: draft.staff_member_id.clone(),
                }
            } else {
                AvailabilityView::Unavailable {
                    reason: result.reason.clone(),
                    alternates: result
                        .alternate_slots
                        .iter()
                        .enumerate()
                        .map(|(index, slot)| SlotOption {
                            index,
                            label: format!(
                                "{} {}",
                                slot.date.format("%a, %b %e"),
                                slot.start_time.format("%H:%M")
                            ),
                            slot: slot.clone(),
                        })
                        .collect(),
                }
            }
        }
    };

    DateTimeView {
        date: draft.date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        date_invalid: invalid.contains("date"),
        start_time_invalid: invalid.contains("start_time"),
        staff_invalid: invalid.contains("staff_member"),
        location_kind: draft.location_kind,
        location_details: draft.location_details.clone(),
        availability,
    }
}

fn summary_panel(controller: &StepFlowController) -> SummaryPanel {
    let draft = controller.draft();
    let breakdown = controller.breakdown();
    let service = controller.selected_service();

    let lines = draft
        .selection
        .entries()
        .map(|(id, entry)| {
            let label = controller
                .loaded_items()
                .and_then(|items| items.iter().find(|item| &item.id == id))
                .map(|item| item.name.clone())
                .unwrap_or_else(|| id.clone());
            SummaryLine {
                label,
                quantity: entry.quantity,
                amount_display: format_cents(entry.unit_price * i64::from(entry.quantity)),
            }
        })
        .collect();

    SummaryPanel {
        service_name: service.map(|s| s.name.clone()),
        date_display: draft.date.map(|date| date.format("%A, %B %e, %Y").to_string()),
        time_display: match (draft.start_time, draft.end_time) {
            (Some(start), Some(end)) => Some(format!(
                "{} – {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )),
            (Some(start), None) => Some(start.format("%H:%M").to_string()),
            _ => None,
        },
        location_display: location_display(draft.location_kind, &draft.location_details),
        lines,
        base_price_display: service.map(|_| format_cents(breakdown.base_price)),
        tax_display: (breakdown.tax > 0).then(|| format_cents(breakdown.tax)),
        total_display: format_cents(breakdown.grand_total),
        duration_minutes: breakdown.total_duration_minutes,
    }
}

fn location_display(kind: LocationKind, details: &str) -> String {
    match kind {
        LocationKind::Business => "At the business".to_string(),
        LocationKind::Onsite => {
            if details.trim().is_empty() {
                "On-site".to_string()
            } else {
                format!("On-site: {details}")
            }
        }
        LocationKind::Virtual => "Virtual".to_string(),
    }
}

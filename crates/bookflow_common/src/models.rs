// --- File: crates/bookflow_common/src/models.rs ---
//! Shared domain model for the booking widget.
//!
//! These types mirror the collaborator-owned REST contracts (camelCase JSON,
//! see the widget endpoints under `/bookings/widget/...`) with two local
//! conventions: monetary amounts are integer cents and durations are integer
//! minutes. The configuration types are immutable once fetched; the only
//! mutable aggregate in the system is the booking draft owned by the step
//! flow controller.

use crate::money;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serde adapter for wall-clock times exchanged as `"HH:MM"` strings.
pub mod wire_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

// --- Widget configuration ---

/// Everything the widget needs to render: the business identity, its
/// bookable services and the business-defined custom fields. Fetched once
/// per widget instantiation and refetched only on re-initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub business: BusinessInfo,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldDefinition>,
}

impl WidgetConfig {
    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// Tax rate fraction applied to base price + items subtotal.
    /// Collaborator-supplied; absent means no tax.
    pub fn tax_rate(&self) -> f64 {
        self.business.tax_rate.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
}

/// A bookable offering. Selecting one sets the base price and base duration
/// the pricing engine derives everything else from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base price in cents.
    #[serde(with = "money::cents")]
    pub price: i64,
    /// Base duration in minutes.
    pub duration: i64,
}

// --- Custom fields ---

/// The closed set of field kinds a business-defined input can take.
/// Rendering and validation are single exhaustive matches over this enum,
/// so adding a kind is a compile-time-visible decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Boolean,
    Textarea,
    Date,
}

/// A value collected for a custom field or a service-item input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// The emptiness rule used by required-field validation. A boolean is
    /// never empty: an unchecked checkbox is a legitimate answer.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Bool(_) => false,
            FieldValue::Text(text) => text.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Bool(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDefinition {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(rename = "fieldType")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
    /// Choices for `Select` fields; empty for every other kind.
    #[serde(default)]
    pub options: Vec<String>,
}

// --- Service items ---

/// How a service item contributes to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Fixed,
    Percentage,
    Hourly,
    PerUnit,
    Free,
}

/// An add-on to a service. Non-free items always use a numeric input;
/// free items may use any field kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "priceType")]
    pub pricing: PricingModel,
    /// Cents for fixed/hourly/per-unit models. For the percentage model the
    /// same cents scale carries the percentage, i.e. wire `15.5` (%) is
    /// stored as `1550`.
    #[serde(rename = "priceValue", with = "money::cents", default)]
    pub price_value: i64,
    #[serde(rename = "fieldType")]
    pub kind: FieldKind,
    #[serde(rename = "isRequired", default)]
    pub required: bool,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
    #[serde(default)]
    pub duration_minutes: i64,
}

fn default_max_quantity() -> u32 {
    1
}

/// The items catalog for one service. Carries the originating service id so
/// the flow controller can discard responses that arrive after the user has
/// already selected a different service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemCatalog {
    pub service_id: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub items: Vec<ServiceItem>,
}

// --- Availability ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub date: NaiveDate,
    #[serde(with = "wire_time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire_time")]
    pub end_time: NaiveTime,
}

/// The complete tuple an availability check is keyed on. Results are only
/// applied while the draft still matches the query they were issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub service_id: String,
}

/// Outcome of an availability check. A denial is a normal domain result,
/// not an error: it carries the alternate slots the user can pick instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub is_available: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub available_staff: Vec<StaffMember>,
    #[serde(default)]
    pub alternate_slots: Vec<TimeSlot>,
}

// --- Booking creation ---

/// Where the appointment takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Business,
    Onsite,
    Virtual,
}

impl Default for LocationKind {
    fn default() -> Self {
        LocationKind::Business
    }
}

/// A selected service item as serialized into the creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemSelection {
    pub value: FieldValue,
    pub quantity: u32,
}

/// The creation payload posted to the booking API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_type: String,
    pub booking_date: NaiveDate,
    #[serde(with = "wire_time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire_time")]
    pub end_time: NaiveTime,
    pub location_type: LocationKind,
    pub location_details: String,
    pub notes: String,
    pub staff_member_id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub custom_fields: BTreeMap<String, FieldValue>,
    pub service_items: BTreeMap<String, ServiceItemSelection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub message: String,
}

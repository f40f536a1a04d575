#[cfg(test)]
mod tests {
    use crate::client::BookingApiClient;
    use crate::error::ApiError;
    use bookflow_common::models::{
        AvailabilityQuery, CreateBookingRequest, FieldKind, FieldValue, LocationKind,
        PricingModel, ServiceItemSelection,
    };
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BookingApiClient {
        BookingApiClient::new(&server.uri(), "/bookings/widget", "biz-1", 5).unwrap()
    }

    fn sample_query() -> AvailabilityQuery {
        AvailabilityQuery {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 60,
            service_id: "svc-1".to_string(),
        }
    }

    #[tokio::test]
    async fn fetches_and_parses_widget_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/widget/biz-1/config/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "business": {
                    "id": "biz-1",
                    "name": "Sparkle Cleaning",
                    "slug": "sparkle",
                    "logo": null,
                    "primaryColor": "#8b5cf6",
                    "taxRate": 0.077
                },
                "services": [
                    {"id": "svc-1", "name": "Deep Clean", "description": "", "price": 100.0, "duration": 60}
                ],
                "customFields": [
                    {"id": "f-1", "slug": "referral", "name": "How did you hear about us?",
                     "fieldType": "select", "required": false, "placeholder": null,
                     "helpText": null, "options": ["Friend", "Search"]}
                ]
            })))
            .mount(&server)
            .await;

        let config = client(&server).fetch_config().await.unwrap();
        assert_eq!(config.business.name, "Sparkle Cleaning");
        assert_eq!(config.tax_rate(), 0.077);
        assert_eq!(config.services[0].price, 10_000);
        assert_eq!(config.custom_fields[0].kind, FieldKind::Select);
        assert_eq!(config.custom_fields[0].options.len(), 2);
    }

    #[tokio::test]
    async fn unknown_business_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/widget/biz-1/config/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "Business not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_config().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn inactive_business_surfaces_server_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/widget/biz-1/config/"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "error": "This business is temporarily closed."
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_config().await.unwrap_err();
        match err {
            ApiError::BusinessInactive(message) => {
                assert_eq!(message, "This business is temporarily closed.")
            }
            other => panic!("expected BusinessInactive, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn service_items_carry_the_originating_service_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/widget/biz-1/service-items/svc-1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "serviceId": "svc-1",
                "serviceName": "Deep Clean",
                "items": [
                    {"id": "item-1", "name": "Extra Room", "description": "",
                     "priceType": "per_unit", "priceValue": 20.0, "fieldType": "number",
                     "isRequired": false, "maxQuantity": 5, "durationMinutes": 10}
                ]
            })))
            .mount(&server)
            .await;

        let catalog = client(&server).fetch_service_items("svc-1").await.unwrap();
        assert_eq!(catalog.service_id, "svc-1");
        assert_eq!(catalog.items[0].pricing, PricingModel::PerUnit);
        assert_eq!(catalog.items[0].price_value, 2_000);
    }

    #[tokio::test]
    async fn availability_denial_is_a_normal_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/widget/biz-1/check-availability/"))
            .and(query_param("date", "2025-01-15"))
            .and(query_param("time", "10:00"))
            .and(query_param("durationMinutes", "60"))
            .and(query_param("serviceId", "svc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "isAvailable": false,
                "reason": "Time is outside business hours",
                "availableStaff": [],
                "alternateSlots": [
                    {"date": "2025-01-15", "startTime": "11:00", "endTime": "12:00"},
                    {"date": "2025-01-15", "startTime": "14:30", "endTime": "15:30"}
                ]
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .check_availability(&sample_query())
            .await
            .unwrap();
        assert!(!result.is_available);
        assert_eq!(result.reason.as_deref(), Some("Time is outside business hours"));
        assert_eq!(result.alternate_slots.len(), 2);
        assert_eq!(
            result.alternate_slots[0].start_time,
            NaiveTime::from_hms_opt(11, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn create_booking_posts_camel_case_payload() {
        let request = CreateBookingRequest {
            service_type: "svc-1".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            location_type: LocationKind::Business,
            location_details: String::new(),
            notes: "Ring the bell".to_string(),
            staff_member_id: "staff-1".to_string(),
            client_name: "Ada Lovelace".to_string(),
            client_email: "ada@example.com".to_string(),
            client_phone: "+41790000000".to_string(),
            custom_fields: BTreeMap::from([
                ("referral".to_string(), FieldValue::text("Friend")),
                ("parking".to_string(), FieldValue::Bool(true)),
            ]),
            service_items: BTreeMap::from([(
                "item-1".to_string(),
                ServiceItemSelection {
                    value: FieldValue::text("3"),
                    quantity: 3,
                },
            )]),
        };
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings/widget/biz-1/create/"))
            .and(body_json(&request))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Booking created successfully!",
                "bookingId": "bk-42"
            })))
            .mount(&server)
            .await;

        let confirmation = client(&server).create_booking(&request).await.unwrap();
        assert_eq!(confirmation.booking_id, "bk-42");
        assert_eq!(confirmation.message, "Booking created successfully!");
    }

    #[tokio::test]
    async fn create_booking_rejection_joins_validation_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings/widget/biz-1/create/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "errors": ["Client email is required.", "Staff member selection is required."]
            })))
            .mount(&server)
            .await;

        let request = CreateBookingRequest {
            service_type: "svc-1".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            location_type: LocationKind::Business,
            location_details: String::new(),
            notes: String::new(),
            staff_member_id: String::new(),
            client_name: "Ada".to_string(),
            client_email: String::new(),
            client_phone: "+41790000000".to_string(),
            custom_fields: BTreeMap::new(),
            service_items: BTreeMap::new(),
        };

        let err = client(&server).create_booking(&request).await.unwrap_err();
        match err {
            ApiError::Server(message) => assert_eq!(
                message,
                "Client email is required. Staff member selection is required."
            ),
            other => panic!("expected Server, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::widget::{Widget, WidgetViewState};
    use bookflow_api::ApiError;
    use bookflow_common::models::{
        AvailabilityQuery, AvailabilityResult, BookingConfirmation, BusinessInfo,
        CreateBookingRequest, FieldKind, FieldValue, PricingModel, Service, ServiceItem,
        ServiceItemCatalog, StaffMember, WidgetConfig,
    };
    use bookflow_common::services::{
        AvailabilityService, BookingService, BoxFuture, BoxedError, ClientFactory, ConfigService,
    };
    use bookflow_flow::controller::FlowEvent;
    use bookflow_flow::view::ViewBody;
    use bookflow_host::{DisplayMode, HostCommand, ScrollPosition, WidgetContext};
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::{Arc, Mutex};

    fn widget_config(primary_color: Option<&str>) -> WidgetConfig {
        WidgetConfig {
            business: BusinessInfo {
                id: "biz-1".into(),
                name: "Sparkle Cleaning".into(),
                slug: None,
                logo: None,
                primary_color: primary_color.map(str::to_string),
                tax_rate: None,
            },
            services: vec![Service {
                id: "svc-1".into(),
                name: "Deep Clean".into(),
                description: String::new(),
                price: 10_000,
                duration: 60,
            }],
            custom_fields: Vec::new(),
        }
    }

    /// In-memory backend recording every remote call the widget makes.
    struct StubBackend {
        config: WidgetConfig,
        fail_config: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn new(config: WidgetConfig) -> Self {
            Self {
                config,
                fail_config: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ConfigService for StubBackend {
        type Error = BoxedError;

        fn fetch_config(&self) -> BoxFuture<'_, WidgetConfig, Self::Error> {
            self.record("config");
            let result = if self.fail_config {
                Err(BoxedError(Box::new(ApiError::NotFound)))
            } else {
                Ok(self.config.clone())
            };
            Box::pin(async move { result })
        }

        fn fetch_service_items(
            &self,
            service_id: &str,
        ) -> BoxFuture<'_, ServiceItemCatalog, Self::Error> {
            self.record("items");
            let catalog = ServiceItemCatalog {
                service_id: service_id.to_string(),
                service_name: "Deep Clean".into(),
                items: vec![ServiceItem {
                    id: "extra-room".into(),
                    name: "Extra Room".into(),
                    description: String::new(),
                    pricing: PricingModel::PerUnit,
                    price_value: 2_000,
                    kind: FieldKind::Number,
                    required: false,
                    max_quantity: 5,
                    duration_minutes: 10,
                }],
            };
            Box::pin(async move { Ok(catalog) })
        }
    }

    impl AvailabilityService for StubBackend {
        type Error = BoxedError;

        fn check_availability(
            &self,
            _query: &AvailabilityQuery,
        ) -> BoxFuture<'_, AvailabilityResult, Self::Error> {
            self.record("availability");
            Box::pin(async move {
                Ok(AvailabilityResult {
                    is_available: true,
                    reason: None,
                    available_staff: vec![StaffMember {
                        id: "staff-1".into(),
                        name: "Grace".into(),
                    }],
                    alternate_slots: Vec::new(),
                })
            })
        }
    }

    impl BookingService for StubBackend {
        type Error = BoxedError;

        fn create_booking(
            &self,
            _request: &CreateBookingRequest,
        ) -> BoxFuture<'_, BookingConfirmation, Self::Error> {
            self.record("create");
            Box::pin(async move {
                Ok(BookingConfirmation {
                    booking_id: "bk-42".into(),
                    message: "Booking created successfully!".into(),
                })
            })
        }
    }

    struct StubFactory {
        backend: Arc<StubBackend>,
    }

    impl ClientFactory for StubFactory {
        fn config_service(&self) -> Arc<dyn ConfigService<Error = BoxedError>> {
            self.backend.clone()
        }

        fn availability_service(&self) -> Arc<dyn AvailabilityService<Error = BoxedError>> {
            self.backend.clone()
        }

        fn booking_service(&self) -> Arc<dyn BookingService<Error = BoxedError>> {
            self.backend.clone()
        }
    }

    fn context(mode: DisplayMode) -> WidgetContext {
        WidgetContext {
            business_id: "biz-1".into(),
            api_base_url: "https://host.example".into(),
            primary_color: "#8b5cf6".into(),
            display_mode: mode,
        }
    }

    async fn mounted(backend: Arc<StubBackend>, mode: DisplayMode) -> Widget {
        Widget::initialize(
            Arc::new(StubFactory {
                backend,
            }),
            context(mode),
            None,
        )
        .await
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn full_booking_flow_completes() {
        let backend = Arc::new(StubBackend::new(widget_config(None)));
        let mut widget = mounted(backend.clone(), DisplayMode::Inline).await;
        assert!(widget.is_ready());

        widget
            .dispatch(FlowEvent::ClientNameChanged("Ada Lovelace".into()))
            .await;
        widget
            .dispatch(FlowEvent::ClientEmailChanged("ada@example.com".into()))
            .await;
        widget
            .dispatch(FlowEvent::ClientPhoneChanged("+41790000000".into()))
            .await;
        widget.dispatch(FlowEvent::NextStep).await;
        widget
            .dispatch(FlowEvent::ServiceSelected {
                service_id: "svc-1".into(),
            })
            .await;
        widget.dispatch(FlowEvent::NextStep).await;
        widget
            .dispatch(FlowEvent::ItemToggled {
                item_id: "extra-room".into(),
            })
            .await;
        widget.dispatch(FlowEvent::NextStep).await;
        widget.dispatch(FlowEvent::DateChanged(Some(date()))).await;
        widget
            .dispatch(FlowEvent::StartTimeChanged(Some(time(10, 0))))
            .await;
        widget
            .dispatch(FlowEvent::StaffSelected {
                staff_id: "staff-1".into(),
            })
            .await;
        widget.dispatch(FlowEvent::NextStep).await;
        let view = widget.dispatch(FlowEvent::Submit).await;

        match view {
            WidgetViewState::Ready(view) => match view.body {
                ViewBody::Confirmation {
                    ref booking_id, ..
                } => assert_eq!(booking_id, "bk-42"),
                ref other => panic!("expected confirmation, got {other:?}"),
            },
            other => panic!("expected a ready view, got {other:?}"),
        }

        // One config fetch, one item fetch, one availability check, one
        // create. Nothing duplicated by the dispatch loop.
        assert_eq!(backend.calls(), ["config", "items", "availability", "create"]);
    }

    #[tokio::test]
    async fn blocked_submission_issues_no_create_call() {
        let backend = Arc::new(StubBackend::new(widget_config(None)));
        let mut widget = mounted(backend.clone(), DisplayMode::Inline).await;

        // Straight to a submit without filling anything in.
        widget.dispatch(FlowEvent::Submit).await;
        assert!(!backend.calls().contains(&"create".to_string()));
    }

    #[tokio::test]
    async fn failed_config_fetch_renders_inline_error() {
        let mut backend = StubBackend::new(widget_config(None));
        backend.fail_config = true;
        let widget = mounted(Arc::new(backend), DisplayMode::Inline).await;

        assert!(!widget.is_ready());
        match widget.view() {
            WidgetViewState::Failed { message } => {
                assert_eq!(message, "Business not found")
            }
            other => panic!("expected a failed view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn modal_close_discards_the_draft() {
        let backend = Arc::new(StubBackend::new(widget_config(None)));
        let mut widget = mounted(backend, DisplayMode::Modal).await;

        let commands = widget.open_overlay(ScrollPosition { x: 0.0, y: 300.0 });
        assert_eq!(commands.len(), 2);

        widget
            .dispatch(FlowEvent::ClientNameChanged("Ada".into()))
            .await;
        let commands = widget.close_overlay();
        assert!(commands.contains(&HostCommand::RestoreHostScroll(ScrollPosition {
            x: 0.0,
            y: 300.0
        })));

        match widget.view() {
            WidgetViewState::Ready(view) => match view.body {
                ViewBody::Form(ref step) => {
                    // Fresh draft at the first step.
                    let rendered = format!("{step:?}");
                    assert!(rendered.contains("ClientInfo"));
                    assert!(!rendered.contains("Ada"));
                }
                ref other => panic!("expected a form, got {other:?}"),
            },
            other => panic!("expected a ready view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn business_branding_colors_the_theme() {
        let backend = Arc::new(StubBackend::new(widget_config(Some("#112233"))));
        let widget = mounted(backend, DisplayMode::Inline).await;
        let theme = widget.theme();
        assert_eq!(theme[0].value, "#112233");
        assert_eq!(theme[1].value, "17, 34, 51");
    }

    #[tokio::test]
    async fn embed_color_overrides_business_branding() {
        let backend = Arc::new(StubBackend::new(widget_config(Some("#112233"))));
        let widget = Widget::initialize(
            Arc::new(StubFactory { backend }),
            context(DisplayMode::Inline),
            Some("#445566".into()),
        )
        .await;
        assert_eq!(widget.theme()[0].value, "#445566");
    }
}

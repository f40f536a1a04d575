// --- File: crates/services/bookflow_widget/src/widget.rs ---
//! The widget itself: initialization and the cooperative event loop.
//!
//! Initialization order is fixed: resolve the embed context, build the
//! clients, fetch the widget configuration, construct the flow controller,
//! render. Initialization failures never panic and never blank the mount
//! point; they produce a terminal inline-error view with the failure text
//! rendered verbatim.

use crate::client_factory::HttpClientFactory;
use crate::state::WidgetState;
use bookflow_common::services::{
    AvailabilityService, BookingService, BoxedError, ClientFactory, ConfigService,
};
use bookflow_flow::controller::{Effect, FlowEvent};
use bookflow_flow::view::{render, WidgetView};
use bookflow_flow::StepFlowController;
use bookflow_host::{
    resolve_context, theme_variables, CssVariable, HostCommand, MountAttrs, ScrollPosition,
    WidgetContext,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, error, info};

/// What the host should render right now.
#[derive(Debug, Clone)]
pub enum WidgetViewState {
    Ready(WidgetView),
    /// Initialization failed; the message is shown inline in the mount
    /// point. No automatic retry is attempted.
    Failed { message: String },
}

struct WidgetServices {
    config: Arc<dyn ConfigService<Error = BoxedError>>,
    availability: Arc<dyn AvailabilityService<Error = BoxedError>>,
    booking: Arc<dyn BookingService<Error = BoxedError>>,
}

enum WidgetInner {
    Ready {
        state: WidgetState,
        services: WidgetServices,
        theme: Vec<CssVariable>,
    },
    Failed {
        message: String,
    },
}

pub struct Widget {
    inner: WidgetInner,
}

impl Widget {
    /// Mount the widget on a host page: read the embed attributes, fetch
    /// the configuration and come up rendering, or come up as an inline
    /// error.
    pub async fn mount(attrs: MountAttrs) -> Widget {
        let defaults = bookflow_config::load_defaults_or_fallback();
        let context = match resolve_context(&attrs, &defaults) {
            Ok(context) => context,
            Err(err) => {
                error!("widget mount failed: {}", err);
                return Widget::failed(err.to_string());
            }
        };
        let factory = match HttpClientFactory::new(&context, &defaults) {
            Ok(factory) => factory,
            Err(err) => {
                error!("widget client construction failed: {}", err);
                return Widget::failed(err.user_message());
            }
        };
        Widget::initialize(Arc::new(factory), context, attrs.color).await
    }

    /// The injectable half of [`Widget::mount`]: everything after context
    /// resolution, against any [`ClientFactory`].
    pub async fn initialize(
        factory: Arc<dyn ClientFactory>,
        context: WidgetContext,
        embed_color: Option<String>,
    ) -> Widget {
        let services = WidgetServices {
            config: factory.config_service(),
            availability: factory.availability_service(),
            booking: factory.booking_service(),
        };

        let config = match services.config.fetch_config().await {
            Ok(config) => config,
            Err(err) => {
                error!("widget configuration fetch failed: {}", err);
                return Widget::failed(err.to_string());
            }
        };
        info!(
            business = %config.business.name,
            services = config.services.len(),
            "widget configuration loaded"
        );

        // Embed attribute wins, then the business branding, then the stock
        // fallback already resolved into the context.
        let effective_color = embed_color
            .map(|color| color.trim().to_string())
            .filter(|color| !color.is_empty())
            .or_else(|| config.business.primary_color.clone())
            .unwrap_or_else(|| context.primary_color.clone());
        let theme = theme_variables(&effective_color);

        let controller = StepFlowController::new(config);
        Widget {
            inner: WidgetInner::Ready {
                state: WidgetState::new(context, controller),
                services,
                theme,
            },
        }
    }

    fn failed(message: String) -> Widget {
        Widget {
            inner: WidgetInner::Failed { message },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.inner, WidgetInner::Ready { .. })
    }

    /// Apply one event and run every effect it (transitively) requests.
    /// Completions are fed straight back into the controller on the same
    /// logical thread, so all ordering guarantees hold trivially here; the
    /// controller additionally defends against stale completions for hosts
    /// that schedule effects themselves.
    pub async fn dispatch(&mut self, event: FlowEvent) -> WidgetViewState {
        if let WidgetInner::Ready {
            state, services, ..
        } = &mut self.inner
        {
            let mut queue: VecDeque<Effect> = state.controller.apply(event).into();
            while let Some(effect) = queue.pop_front() {
                let follow_up = run_effect(services, effect).await;
                queue.extend(state.controller.apply(follow_up));
            }
        }
        self.view()
    }

    /// The current frame, without applying anything.
    pub fn view(&self) -> WidgetViewState {
        match &self.inner {
            WidgetInner::Ready { state, .. } => {
                WidgetViewState::Ready(render(&state.controller))
            }
            WidgetInner::Failed { message } => WidgetViewState::Failed {
                message: message.clone(),
            },
        }
    }

    /// CSS custom properties for the widget root.
    pub fn theme(&self) -> &[CssVariable] {
        match &self.inner {
            WidgetInner::Ready { theme, .. } => theme,
            WidgetInner::Failed { .. } => &[],
        }
    }

    pub fn context(&self) -> Option<&WidgetContext> {
        match &self.inner {
            WidgetInner::Ready { state, .. } => Some(&state.context),
            WidgetInner::Failed { .. } => None,
        }
    }

    /// Open the modal overlay (modal embeds only).
    pub fn open_overlay(&mut self, scroll: ScrollPosition) -> Vec<HostCommand> {
        match &mut self.inner {
            WidgetInner::Ready { state, .. } if state.context.modal_mode() => {
                state.overlay.open(scroll)
            }
            _ => Vec::new(),
        }
    }

    /// Close the modal overlay. Host-triggered teardown: the in-progress
    /// draft is discarded along with it.
    pub fn close_overlay(&mut self) -> Vec<HostCommand> {
        match &mut self.inner {
            WidgetInner::Ready { state, .. } => {
                let commands = state.overlay.close();
                if !commands.is_empty() {
                    debug!("modal closed, discarding draft");
                    state.controller.reset();
                }
                commands
            }
            _ => Vec::new(),
        }
    }
}

async fn run_effect(services: &WidgetServices, effect: Effect) -> FlowEvent {
    match effect {
        Effect::LoadServiceItems { service_id } => {
            match services.config.fetch_service_items(&service_id).await {
                Ok(catalog) => FlowEvent::ItemsLoaded { catalog },
                Err(err) => {
                    error!(%service_id, "service item fetch failed: {}", err);
                    FlowEvent::ItemsLoadFailed {
                        service_id,
                        message: err.to_string(),
                    }
                }
            }
        }
        Effect::CheckAvailability { query } => {
            match services.availability.check_availability(&query).await {
                Ok(result) => FlowEvent::AvailabilityChecked { query, result },
                Err(err) => {
                    error!("availability check failed: {}", err);
                    FlowEvent::AvailabilityCheckFailed {
                        query,
                        message: err.to_string(),
                    }
                }
            }
        }
        Effect::SubmitBooking { request } => {
            match services.booking.create_booking(&request).await {
                Ok(confirmation) => FlowEvent::SubmissionSucceeded { confirmation },
                Err(err) => {
                    error!("booking submission failed: {}", err);
                    FlowEvent::SubmissionFailed {
                        message: err.to_string(),
                    }
                }
            }
        }
    }
}

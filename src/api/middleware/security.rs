//! Browser-facing protections: CORS, security headers and panic capture.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::domain::clock::Clock;
use crate::domain::events::{EventSink, LogEvent};

/// CORS policy allowing a single browser origin with credentials.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

type HeaderLayers = Stack<
    SetResponseHeaderLayer<HeaderValue>,
    Stack<
        SetResponseHeaderLayer<HeaderValue>,
        Stack<SetResponseHeaderLayer<HeaderValue>, Identity>,
    >,
>;

/// Sets `nosniff`, frame denial and `no-referrer` on every response.
///
/// Values already set by a handler are kept.
pub fn security_headers() -> ServiceBuilder<HeaderLayers> {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
}

/// Handles panics raised inside handlers.
///
/// Emits a `fatal` event to the log collaborator and answers with a generic
/// JSON 500 so that no panic message reaches the client.
#[derive(Clone)]
pub struct PanicResponder {
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl PanicResponder {
    pub fn new(events: Arc<dyn EventSink>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    fn respond(&self, panic: Box<dyn Any + Send + 'static>) -> Response {
        let detail = if let Some(s) = panic.downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            *s
        } else {
            "unknown panic payload"
        };

        tracing::error!("Handler panicked: {}", detail);
        self.events.record(LogEvent::fatal(
            self.clock.as_ref(),
            "middleware",
            format!("Unhandled panic: {}", detail),
        ));

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}

impl tower_http::catch_panic::ResponseForPanic for PanicResponder {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> axum::http::Response<Self::ResponseBody> {
        self.respond(err)
    }
}

/// Creates the panic-catching layer.
pub fn catch_panic_layer(
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder::new(events, clock))
}

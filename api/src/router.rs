//! Router construction and the cross-cutting middleware stack

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info_span;

use crate::api::health;
use crate::error::handle_panic;
use crate::middleware::{cors_layer, resolve_client_ip, ClientIp, MakeRequestUuid};
use crate::AppState;

/// Ceiling on request handling time
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the application router.
///
/// Middleware order is fixed: request-id tagging, client-IP resolution,
/// access logging, panic recovery, request timeout, CORS. The request id
/// is propagated onto the response innermost so every layer above sees it.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(axum::middleware::from_fn(resolve_client_ip))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        let client_ip = request
                            .extensions()
                            .get::<ClientIp>()
                            .map(|ip| ip.0.as_str())
                            .unwrap_or("unknown");
                        info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                            client_ip = %client_ip,
                        )
                    }),
                )
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(cors_layer())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

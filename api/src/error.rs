//! Error responses for the HTTP layer
//!
//! Request-phase failures are contained per request: a handler panic is
//! converted into a 500 JSON body by the recovery middleware and the
//! process keeps serving.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON body returned for errors surfaced by the middleware stack
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Convert a handler panic into a 500 response.
///
/// The panic payload stays in the server log; clients only see a generic
/// message plus an id they can quote back.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    let request_id = Uuid::new_v4().to_string();
    tracing::error!("Handler panic [{}]: {}", request_id, detail);

    let body = ErrorResponse {
        error: ErrorInfo {
            code: "internal_error".to_string(),
            message: "Internal server error".to_string(),
        },
        request_id: Some(request_id),
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

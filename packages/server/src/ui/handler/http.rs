//! HTTP endpoint handlers.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Static body of the health check endpoint
pub const HEALTH_CHECK_BODY: &str = "Chat server is running!";

/// Generic body returned when a handler panics
pub const INTERNAL_ERROR_BODY: &str = "Something broke!";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    HEALTH_CHECK_BODY
}

/// Convert a handler panic into a generic 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}

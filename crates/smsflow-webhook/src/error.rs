/// Webhook error types
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use smsflow_core::RelayError;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Plain-text bodies; the provider only looks at the status
        match self {
            WebhookError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                "Method Not Allowed",
            )
                .into_response(),
            WebhookError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            WebhookError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

impl From<RelayError> for WebhookError {
    fn from(err: RelayError) -> Self {
        match err.status_code() {
            401 => WebhookError::Unauthorized(err.to_string()),
            _ => WebhookError::Internal(err.to_string()),
        }
    }
}

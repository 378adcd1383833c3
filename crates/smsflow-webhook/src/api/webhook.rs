/// Webhook gate: method check, signature check, decode, dispatch
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
};
use smsflow_core::constants::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use smsflow_core::models::InboundEvent;
use smsflow_core::services::metrics::Metrics;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::context::RelayContext;
use crate::error::WebhookError;

/// Handles a telephony webhook delivery.
///
/// Anything short of a body that is not JSON or a store failure is answered
/// with 200, so the provider never redelivers an event we chose to drop.
pub async fn handler(
    State(ctx): State<Arc<RelayContext>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookError> {
    if method != Method::POST {
        warn!(method = %method, "Rejecting non-POST webhook request");
        return Err(WebhookError::MethodNotAllowed(method.to_string()));
    }

    Metrics::webhook_received(ctx.relay.metrics().as_ref()).await;

    if let Some(verifier) = &ctx.verifier {
        let signature = required_header(&headers, SIGNATURE_HEADER)?;
        let timestamp = required_header(&headers, TIMESTAMP_HEADER)?;

        verifier
            .verify(&body, signature, timestamp, chrono::Utc::now().timestamp())
            .map_err(|e| {
                warn!(error = %e, "Webhook signature rejected");
                WebhookError::from(e)
            })?;
    }

    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, size = body.len(), "Webhook body is not JSON");
        WebhookError::Internal(format!("invalid payload: {}", e))
    })?;
    let event = InboundEvent::from_value(value);

    let outcome = ctx.relay.process(&event).await.map_err(|e| {
        error!(error = %e, "Webhook processing failed");
        WebhookError::from(e)
    })?;

    info!(outcome = ?outcome, "Webhook handled");
    Ok("OK")
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, WebhookError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| WebhookError::Unauthorized(format!("missing {}", name)))
}

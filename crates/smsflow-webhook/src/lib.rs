/// smsflow webhook - Lambda entry point of the SMS/MMS relay
///
/// `GET /health` reports store connectivity; every other request, including
/// other methods on `/health`, goes to the webhook gate, which only accepts POST.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::RelayContext;
pub use error::WebhookError;

use axum::{
    Router, body::Body as AxumBody, extract::DefaultBodyLimit, middleware as axum_middleware,
    routing::get,
};
use lambda_http::{Body, Error as LambdaError, Request, Response};
use std::sync::Arc;
use tower::ServiceExt;
use tracing::debug;

/// API Gateway payload limit
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the axum router serving the webhook and health endpoints
pub fn router(ctx: Arc<RelayContext>) -> Router {
    Router::new()
        .route(
            "/health",
            get(api::health::handler).fallback(api::webhook::handler),
        )
        .fallback(api::webhook::handler)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(ctx)
}

/// Lambda handler - converts the Lambda HTTP request for the axum router
pub async fn handler(ctx: Arc<RelayContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    debug!("Processing request: {} {}", event.method(), event.uri().path());

    let (parts, body) = event.into_parts();
    let axum_request = http::Request::from_parts(parts, AxumBody::from(body.to_vec()));

    let response = router(ctx).oneshot(axum_request).await?;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(Response::from_parts(parts, Body::from(body_bytes.to_vec())))
}

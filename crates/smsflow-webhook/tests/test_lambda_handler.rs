/// Lambda request bridging
#[path = "common/mod.rs"]
mod common;

use common::*;
use lambda_http::{Body, Request};
use smsflow_core::Relay;
use smsflow_core::routing::InMemoryKeyValueStore;
use smsflow_core::services::metrics::NoopMetricsService;
use smsflow_webhook::RelayContext;
use std::sync::Arc;
use wiremock::MockServer;

async fn context() -> (Arc<RelayContext>, MockServer, MockServer) {
    let telnyx = MockServer::start().await;
    let mailgun = MockServer::start().await;
    let relay = Relay::from_config(
        &config(&telnyx, &mailgun),
        reqwest::Client::new(),
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(NoopMetricsService),
    );
    (
        RelayContext::from_parts(relay, None),
        telnyx,
        mailgun,
    )
}

#[tokio::test]
async fn test_handler_acknowledges_webhook() {
    let (ctx, _telnyx, _mailgun) = context().await;

    let request: Request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(default_inbound_event().to_string()))
        .unwrap();

    let response = smsflow_webhook::handler(ctx, request).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(&response.body()[..], b"OK");
}

#[tokio::test]
async fn test_handler_rejects_get() {
    let (ctx, _telnyx, _mailgun) = context().await;

    let request: Request = http::Request::builder()
        .method("GET")
        .uri("/webhooks/telnyx")
        .body(Body::Empty)
        .unwrap();

    let response = smsflow_webhook::handler(ctx, request).await.unwrap();
    assert_eq!(response.status(), 405);
}

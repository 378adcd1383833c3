//! Shared harness for webhook integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, body::Body, http::StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::signature::{Ed25519KeyPair, KeyPair};
use secrecy::SecretString;
use serde_json::{Value, json};
use smsflow_core::models::{MailgunConfig, RelayConfig, TelnyxConfig};
use smsflow_core::routing::{InMemoryKeyValueStore, KeyValueStore};
use smsflow_core::services::metrics::MockMetricsService;
use smsflow_core::utils::signature::WebhookVerifier;
use smsflow_core::{Relay, RelayError};
use smsflow_webhook::RelayContext;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;
use wiremock::MockServer;

pub const DESTINATION: &str = "+15559876543";
pub const SENDER: &str = "+15551234567";
/// Seed of the key pair standing in for the provider's signing key
const SIGNING_SEED: [u8; 32] = [42; 32];

fn signing_key() -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed_unchecked(&SIGNING_SEED).unwrap()
}

/// Base64 public key as shown in the provider portal
pub fn public_key() -> String {
    STANDARD.encode(signing_key().public_key().as_ref())
}

/// Signature header value for a body sent at `timestamp`
pub fn sign(timestamp: &str, body: &str) -> String {
    let message = format!("{}|{}", timestamp, body);
    STANDARD.encode(signing_key().sign(message.as_bytes()).as_ref())
}

/// A router wired to in-memory routes and mock provider servers
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryKeyValueStore>,
    pub metrics: Arc<MockMetricsService>,
    pub telnyx: MockServer,
    pub mailgun: MockServer,
    pub media: MockServer,
}

pub fn config(telnyx: &MockServer, mailgun: &MockServer) -> RelayConfig {
    RelayConfig {
        telnyx: TelnyxConfig {
            api_key: SecretString::from("KEY_TEST"),
            api_base: Url::parse(&telnyx.uri()).unwrap(),
        },
        mailgun: MailgunConfig {
            api_key: SecretString::from("key-test"),
            domain: "mg.acme.com".to_string(),
            from: "sms@acme.com".to_string(),
            api_base: Url::parse(&mailgun.uri()).unwrap(),
        },
        routes_table: "smsflow-routes-test".to_string(),
        display_timezone: chrono_tz::America::New_York,
        webhook_public_key: None,
        webhook_tolerance_secs: 300,
        metrics_enabled: false,
    }
}

pub async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryKeyValueStore::new());
    spawn_app_with_store(store.clone(), store, None).await
}

/// App that only accepts webhooks signed with the test key pair
pub async fn spawn_signed_app() -> TestApp {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let verifier = WebhookVerifier::from_base64(&public_key(), 300).unwrap();
    spawn_app_with_store(store.clone(), store, Some(verifier)).await
}

async fn spawn_app_with_store(
    store: Arc<InMemoryKeyValueStore>,
    backing: Arc<dyn KeyValueStore>,
    verifier: Option<WebhookVerifier>,
) -> TestApp {
    let telnyx = MockServer::start().await;
    let mailgun = MockServer::start().await;
    let media = MockServer::start().await;
    let metrics = Arc::new(MockMetricsService::new());

    let relay = Relay::from_config(
        &config(&telnyx, &mailgun),
        reqwest::Client::new(),
        backing,
        metrics.clone(),
    );
    let ctx = RelayContext::from_parts(relay, verifier);

    TestApp {
        router: smsflow_webhook::router(ctx),
        store,
        metrics,
        telnyx,
        mailgun,
        media,
    }
}

/// App whose route store fails every read
pub async fn spawn_app_with_broken_store() -> TestApp {
    spawn_app_with_store(
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(FailingStore),
        None,
    )
    .await
}

pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, RelayError> {
        Err(RelayError::Storage("ProvisionedThroughputExceeded".to_string()))
    }

    async fn ping(&self) -> Result<(), RelayError> {
        Err(RelayError::Storage("unreachable".to_string()))
    }
}

impl TestApp {
    pub async fn put_route(&self, destination: &str, route: Value) {
        self.store
            .put(format!("route:{}", destination), route.to_string())
            .await;
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, &str)],
        body: impl Into<Body>,
    ) -> (StatusCode, String) {
        let mut builder = http::Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(body.into()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    pub async fn post_json(&self, payload: &Value) -> (StatusCode, String) {
        self.request(
            "POST",
            "/",
            &[("content-type", "application/json")],
            payload.to_string(),
        )
        .await
    }

    /// Form fields of every request the email provider received
    pub async fn sent_emails(&self) -> Vec<HashMap<String, String>> {
        self.mailgun
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                url::form_urlencoded::parse(&request.body)
                    .into_owned()
                    .collect()
            })
            .collect()
    }
}

/// Inbound `message.received` webhook with the given `to` shape
pub fn inbound_event(to: Value) -> Value {
    json!({
        "data": {
            "event_type": "message.received",
            "id": "b0f5e7c2-8d4a-4f0e-9a36-6f3d5c1a2b77",
            "occurred_at": "2024-05-01T12:30:00.000+00:00",
            "payload": {
                "direction": "inbound",
                "from": {"phone_number": SENDER, "carrier": "T-Mobile USA"},
                "to": to,
                "text": "Is the shop open today?",
                "media": []
            }
        }
    })
}

pub fn default_inbound_event() -> Value {
    inbound_event(json!([{"phone_number": DESTINATION}]))
}

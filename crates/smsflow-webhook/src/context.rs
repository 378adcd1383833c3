/// Relay context - shared state for all requests of one Lambda instance
use lambda_http::Error;
use smsflow_core::routing::DynamoDbKeyValueStore;
use smsflow_core::services::config::load_config;
use smsflow_core::services::metrics::{
    CloudWatchMetricsService, MetricsService, NoopMetricsService,
};
use smsflow_core::utils::signature::WebhookVerifier;
use smsflow_core::Relay;
use std::sync::Arc;
use tracing::info;

pub struct RelayContext {
    pub relay: Relay,

    /// Webhook bodies must carry a valid Telnyx signature when set
    pub verifier: Option<WebhookVerifier>,
}

impl RelayContext {
    /// Builds the context from environment configuration and AWS clients
    pub async fn new() -> Result<Arc<Self>, Error> {
        let config = load_config()?;

        let aws_config = aws_config::load_from_env().await;
        let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);
        let store = Arc::new(DynamoDbKeyValueStore::new(
            dynamodb_client,
            config.routes_table.clone(),
        ));

        let metrics: Arc<dyn MetricsService> = if config.metrics_enabled {
            Arc::new(CloudWatchMetricsService::new(
                aws_sdk_cloudwatch::Client::new(&aws_config),
            ))
        } else {
            Arc::new(NoopMetricsService)
        };

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("smsflow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(table = %config.routes_table, "Relay context initialized");

        let verifier = config.webhook_verifier()?;
        let relay = Relay::from_config(&config, http_client, store, metrics);
        Ok(Self::from_parts(relay, verifier))
    }

    pub fn from_parts(relay: Relay, verifier: Option<WebhookVerifier>) -> Arc<Self> {
        Arc::new(Self { relay, verifier })
    }
}

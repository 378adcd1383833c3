/// CloudWatch metrics for relay outcomes
use crate::constants::METRICS_NAMESPACE;
use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use std::collections::HashMap;
use tracing::{debug, error};

#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Record a counter metric (count of events)
    async fn record_counter(&self, name: &str, value: f64, dimensions: &[(&str, &str)]);

    /// Record a histogram metric (distribution of values)
    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    );
}

#[derive(Debug, Clone, Copy)]
pub enum MetricUnit {
    Count,
    Milliseconds,
    Bytes,
}

impl From<MetricUnit> for StandardUnit {
    fn from(unit: MetricUnit) -> Self {
        match unit {
            MetricUnit::Count => StandardUnit::Count,
            MetricUnit::Milliseconds => StandardUnit::Milliseconds,
            MetricUnit::Bytes => StandardUnit::Bytes,
        }
    }
}

/// CloudWatch metrics service implementation
pub struct CloudWatchMetricsService {
    client: aws_sdk_cloudwatch::Client,
    namespace: String,
}

impl CloudWatchMetricsService {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self {
            client,
            namespace: METRICS_NAMESPACE.to_string(),
        }
    }

    async fn emit_metric(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    ) {
        let dims: Vec<Dimension> = dimensions
            .iter()
            .map(|(k, v)| Dimension::builder().name(*k).value(*v).build())
            .collect();

        let datum = MetricDatum::builder()
            .metric_name(name)
            .value(value)
            .unit(unit.into())
            .timestamp(aws_smithy_types::DateTime::from(
                std::time::SystemTime::now(),
            ))
            .set_dimensions(if dims.is_empty() { None } else { Some(dims) })
            .build();

        // Metric failures never affect the webhook response
        match self
            .client
            .put_metric_data()
            .namespace(&self.namespace)
            .metric_data(datum)
            .send()
            .await
        {
            Ok(_) => {
                debug!(target: "metrics", metric = name, value = value, "Emitted metric");
            }
            Err(e) => {
                error!(
                    target: "metrics",
                    metric = name,
                    error = %e,
                    "Failed to emit metric to CloudWatch"
                );
            }
        }
    }
}

#[async_trait]
impl MetricsService for CloudWatchMetricsService {
    async fn record_counter(&self, name: &str, value: f64, dimensions: &[(&str, &str)]) {
        self.emit_metric(name, value, MetricUnit::Count, dimensions)
            .await;
    }

    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    ) {
        self.emit_metric(name, value, unit, dimensions).await;
    }
}

/// Discards everything; used when `METRICS_ENABLED=false`
pub struct NoopMetricsService;

#[async_trait]
impl MetricsService for NoopMetricsService {
    async fn record_counter(&self, _name: &str, _value: f64, _dimensions: &[(&str, &str)]) {}

    async fn record_histogram(
        &self,
        _name: &str,
        _value: f64,
        _unit: MetricUnit,
        _dimensions: &[(&str, &str)],
    ) {
    }
}

/// Helper functions for the relay's metrics
pub struct Metrics;

impl Metrics {
    pub async fn webhook_received(service: &dyn MetricsService) {
        service.record_counter("WebhooksReceived", 1.0, &[]).await;
    }

    pub async fn event_ignored(service: &dyn MetricsService) {
        service.record_counter("EventsIgnored", 1.0, &[]).await;
    }

    pub async fn route_missing(service: &dyn MetricsService) {
        service.record_counter("RoutesMissing", 1.0, &[]).await;
    }

    /// Record an auto-reply attempt
    pub async fn reply_attempted(service: &dyn MetricsService, delivered: bool) {
        let name = if delivered {
            "RepliesSent"
        } else {
            "ReplyFailures"
        };
        service.record_counter(name, 1.0, &[]).await;
    }

    /// Record an email forward attempt
    pub async fn email_attempted(service: &dyn MetricsService, delivered: bool) {
        let name = if delivered {
            "EmailsForwarded"
        } else {
            "EmailFailures"
        };
        service.record_counter(name, 1.0, &[]).await;
    }

    /// Record media inlining results for one message
    pub async fn media_inlined(service: &dyn MetricsService, inlined: usize, failed: usize) {
        if inlined > 0 {
            service
                .record_counter("MediaInlined", inlined as f64, &[])
                .await;
        }
        if failed > 0 {
            service
                .record_counter("MediaFailures", failed as f64, &[])
                .await;
        }
    }

    pub async fn unsupported_mode(service: &dyn MetricsService, mode: &str) {
        service
            .record_counter("UnsupportedModes", 1.0, &[("Mode", mode)])
            .await;
    }

    /// Record end-to-end processing time of one webhook
    pub async fn processing_time(service: &dyn MetricsService, duration_ms: f64) {
        service
            .record_histogram(
                "ProcessingTime",
                duration_ms,
                MetricUnit::Milliseconds,
                &[],
            )
            .await;
    }
}

/// Mock metrics service for testing
pub struct MockMetricsService {
    metrics: tokio::sync::Mutex<HashMap<String, Vec<f64>>>,
}

impl MockMetricsService {
    pub fn new() -> Self {
        Self {
            metrics: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_metric_values(&self, name: &str) -> Vec<f64> {
        self.metrics
            .lock()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for MockMetricsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsService for MockMetricsService {
    async fn record_counter(&self, name: &str, value: f64, _dimensions: &[(&str, &str)]) {
        let mut metrics = self.metrics.lock().await;
        metrics.entry(name.to_string()).or_default().push(value);
    }

    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        _unit: MetricUnit,
        _dimensions: &[(&str, &str)],
    ) {
        let mut metrics = self.metrics.lock().await;
        metrics.entry(name.to_string()).or_default().push(value);
    }
}

use lambda_http::{Error, Request, run, service_fn};
use smsflow_webhook::RelayContext;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // JSON logs for CloudWatch, level from RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    info!(version = smsflow_core::VERSION, "Starting smsflow webhook Lambda");

    let ctx = RelayContext::new().await?;

    run(service_fn(|event: Request| {
        let ctx = ctx.clone();
        async move { smsflow_webhook::handler(ctx, event).await }
    }))
    .await
}

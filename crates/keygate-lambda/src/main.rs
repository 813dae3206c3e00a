use std::sync::Arc;

use anyhow::Context;
use keygate_core::{gateway, Authorizer, AuthorizerConfig, DynamoStore};
use lambda_runtime::{service_fn, LambdaEvent};
use tracing::{info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AuthorizerConfig::from_env().context("invalid authorizer configuration")?;
    info!(
        table = %config.table_name,
        header = %config.token_header,
        format = %config.response_format,
        "starting authorizer"
    );

    // One client per process; invocations share it.
    let store = DynamoStore::from_env(&config).await;
    let authorizer = Authorizer::new(config, Arc::new(store));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let authorizer = authorizer.clone();
        async move { handle(&authorizer, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

async fn handle(
    authorizer: &Authorizer,
    event: LambdaEvent<serde_json::Value>,
) -> Result<serde_json::Value, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("authorize", request_id = %context.request_id);

    let response = gateway::handle_event(authorizer, payload)
        .instrument(span)
        .await?;
    Ok(response)
}

/// JSON logs on stdout; CloudWatch adds its own timestamps.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

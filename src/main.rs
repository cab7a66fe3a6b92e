#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context;
use lambda_inventory::app::aws_clients::AwsClients;
use lambda_inventory::app::config::InventoryConfig;
use lambda_inventory::app::inventory::{InventoryPipeline, RunSummary, SystemClock};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::prelude::*;

/// Default filter when `RUST_LOG` is unset. AWS SDK internals are kept at
/// warn so a run with hundreds of functions stays readable.
const DEFAULT_LOG_FILTER: &str = "lambda_inventory=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,aws_smithy_http=warn,hyper=warn,lambda_runtime=info";

fn init_logging() -> anyhow::Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::builder()
            .parse(DEFAULT_LOG_FILTER)
            .context("Failed to parse default log filter")?,
    };

    // CloudWatch Logs timestamps every line already
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_target(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Bridge log crate events from dependencies into tracing
    tracing_log::LogTracer::init().context("Failed to initialize log-to-tracing bridge")?;

    Ok(())
}

async fn handler(
    event: LambdaEvent<Value>,
    pipeline: &InventoryPipeline,
) -> Result<RunSummary, Error> {
    // The trigger payload is not interpreted
    tracing::debug!(request_id = %event.context.request_id, "Inventory run triggered");

    let summary = pipeline.run(&SystemClock).await.map_err(|err| {
        tracing::error!("Inventory run failed: {:#}", err);
        err
    })?;

    tracing::info!(
        "Inventory of {} functions written to {}",
        summary.function_count,
        summary.location
    );
    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let config = InventoryConfig::from_env()?;
    tracing::info!(
        "lambda-inventory {} starting (bucket: {}, allow-list: {} names, concurrency: {})",
        env!("CARGO_PKG_VERSION"),
        config.bucket,
        config.function_names.len(),
        config.concurrency
    );

    let sources = AwsClients::load(config.region.as_deref())
        .await
        .into_sources();
    let pipeline = InventoryPipeline::new(sources, config);
    let pipeline = &pipeline;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(event, pipeline).await
    }))
    .await
}

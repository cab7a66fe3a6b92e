use super::MetricsReader;
use crate::app::inventory::types::MetricWindow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatch as cloudwatch;
use cloudwatch::primitives::DateTime as SmithyDateTime;
use cloudwatch::types::{Dimension, Statistic};

/// Namespace Lambda publishes its per-function metrics under
pub const LAMBDA_METRICS_NAMESPACE: &str = "AWS/Lambda";

pub struct CloudWatchMetricsService {
    client: cloudwatch::Client,
}

impl CloudWatchMetricsService {
    pub fn new(client: cloudwatch::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricsReader for CloudWatchMetricsService {
    async fn sum_datapoints(
        &self,
        function_name: &str,
        metric_name: &str,
        window: &MetricWindow,
    ) -> Result<Vec<f64>> {
        let dimension = Dimension::builder()
            .name("FunctionName")
            .value(function_name)
            .build();

        let response = self
            .client
            .get_metric_statistics()
            .namespace(LAMBDA_METRICS_NAMESPACE)
            .metric_name(metric_name)
            .dimensions(dimension)
            .start_time(SmithyDateTime::from_secs(window.start.timestamp()))
            .end_time(SmithyDateTime::from_secs(window.end.timestamp()))
            .period(window.period_seconds)
            .statistics(Statistic::Sum)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to get {} statistics for function {}",
                    metric_name, function_name
                )
            })?;

        Ok(response
            .datapoints
            .unwrap_or_default()
            .iter()
            .filter_map(|datapoint| datapoint.sum)
            .collect())
    }
}

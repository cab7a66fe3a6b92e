//! Inventory Pipeline
//!
//! Enumerate, collect per function, assemble, write. The run either uploads
//! one complete report or fails without writing anything.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::info;

use crate::app::aws_services::InventorySources;
use crate::app::config::InventoryConfig;
use crate::app::inventory::assembler::{assemble_record, CollectedFields};
use crate::app::inventory::collectors::{
    check_log_group, collect_metric_totals, resolve_last_success, resolve_role_info, resolve_tags,
};
use crate::app::inventory::enumerator::enumerate_functions;
use crate::app::inventory::report::{ReportLocation, ReportWriter};
use crate::app::inventory::types::{
    FunctionDescriptor, InventoryRecord, InventoryReport, MetricWindow,
};

/// Source of the current time, injectable for tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result returned to the Lambda caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub status_code: u16,
    pub body: String,
    #[serde(skip)]
    pub location: ReportLocation,
    #[serde(skip)]
    pub function_count: usize,
}

impl RunSummary {
    pub fn completed(location: ReportLocation, function_count: usize) -> Self {
        Self {
            status_code: 200,
            body: format!(
                "Lambda Inventory Report generated and uploaded to s3://{}/",
                location.bucket
            ),
            location,
            function_count,
        }
    }
}

pub struct InventoryPipeline {
    sources: InventorySources,
    config: InventoryConfig,
    writer: ReportWriter,
}

impl InventoryPipeline {
    pub fn new(sources: InventorySources, config: InventoryConfig) -> Self {
        let writer = ReportWriter::new(
            sources.store.clone(),
            config.bucket.clone(),
            config.report_prefix.clone(),
        );
        Self {
            sources,
            config,
            writer,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Run one inventory. Enumeration and upload failures are returned;
    /// everything else degrades to default values in the affected row.
    pub async fn run(&self, clock: &dyn Clock) -> Result<RunSummary> {
        let window = MetricWindow::ending_at(
            clock.now(),
            self.config.lookback(),
            self.config.metric_period_seconds,
        );

        let functions =
            enumerate_functions(self.sources.functions.as_ref(), &self.config.function_names)
                .await?;
        info!(
            "Collecting inventory for {} Lambda functions (window {} .. {})",
            functions.len(),
            window.start,
            window.end
        );

        // `buffered` keeps enumerator order whatever the concurrency
        let records: Vec<InventoryRecord> = stream::iter(&functions)
            .map(|function| self.collect_record(function, &window))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let report = InventoryReport::new(records);
        let location = self.writer.write(&report, clock.now()).await?;

        Ok(RunSummary::completed(location, report.len()))
    }

    async fn collect_record(
        &self,
        function: &FunctionDescriptor,
        window: &MetricWindow,
    ) -> InventoryRecord {
        info!(function = %function.name, "Processing Lambda function");

        let sources = &self.sources;
        let fields = CollectedFields {
            log_group: check_log_group(sources.logs.as_ref(), &function.name).await,
            metrics: collect_metric_totals(sources.metrics.as_ref(), &function.name, window).await,
            last_success: resolve_last_success(sources.logs.as_ref(), &function.name).await,
            tags: resolve_tags(
                sources.functions.as_ref(),
                &function.name,
                &function.function_arn,
            )
            .await,
            role: resolve_role_info(
                sources.roles.as_ref(),
                &function.name,
                function.role_arn.as_deref(),
            )
            .await,
        };

        assemble_record(function, &fields)
    }
}

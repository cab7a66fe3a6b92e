//! AWS Service Seams
//!
//! The inventory talks to five AWS APIs. Each one is reached through a small
//! trait so the pipeline can run against the real SDK clients in Lambda and
//! against in-memory fakes in tests.
//!
//! | Trait | Service | Calls |
//! |---|---|---|
//! | [`FunctionCatalog`] | Lambda | `ListFunctions`, `ListTags` |
//! | [`LogsReader`] | CloudWatch Logs | `DescribeLogGroups`, `DescribeLogStreams` |
//! | [`MetricsReader`] | CloudWatch | `GetMetricStatistics` |
//! | [`RoleDirectory`] | IAM | `GetRole` |
//! | [`ReportStore`] | S3 | `PutObject` |
//!
//! Only [`ReportStore`] mutates anything.

#![warn(clippy::all, rust_2018_idioms)]

pub mod cloudwatch;
pub mod iam;
pub mod lambda;
pub mod logs;
pub mod s3;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::app::inventory::types::{FunctionDescriptor, MetricWindow, TagSet};

pub use cloudwatch::CloudWatchMetricsService;
pub use iam::IamRoleService;
pub use lambda::LambdaCatalogService;
pub use logs::LogsService;
pub use s3::S3ReportStore;

/// One page of `ListFunctions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionPage {
    pub functions: Vec<FunctionDescriptor>,
    /// Marker for the next page; `None` on the last page
    pub next_marker: Option<String>,
}

/// The fields of a log group the inventory cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroupSummary {
    pub name: String,
    /// Unix milliseconds
    pub creation_time: Option<i64>,
}

#[async_trait]
pub trait FunctionCatalog: Send + Sync {
    /// Fetch one page of function configurations starting at `marker`
    async fn list_functions_page(&self, marker: Option<String>) -> Result<FunctionPage>;

    async fn list_tags(&self, function_arn: &str) -> Result<TagSet>;
}

#[async_trait]
pub trait LogsReader: Send + Sync {
    /// Log groups whose name starts with `prefix` (siblings included)
    async fn find_log_groups(&self, prefix: &str) -> Result<Vec<LogGroupSummary>>;

    /// Last event timestamp (Unix milliseconds) of the most recently written stream
    async fn latest_event_timestamp(&self, log_group_name: &str) -> Result<Option<i64>>;
}

#[async_trait]
pub trait MetricsReader: Send + Sync {
    /// Per-period `Sum` datapoints of an `AWS/Lambda` metric for one function
    async fn sum_datapoints(
        &self,
        function_name: &str,
        metric_name: &str,
        window: &MetricWindow,
    ) -> Result<Vec<f64>>;
}

#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Last time the role was assumed; `Ok(None)` if it never was
    async fn role_last_used(&self, role_name: &str) -> Result<Option<DateTime<Utc>>>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Write `body` as a new object. Must not replace an existing object.
    async fn put_report(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Every backend the inventory pipeline needs, shared read-only across a run
#[derive(Clone)]
pub struct InventorySources {
    pub functions: Arc<dyn FunctionCatalog>,
    pub logs: Arc<dyn LogsReader>,
    pub metrics: Arc<dyn MetricsReader>,
    pub roles: Arc<dyn RoleDirectory>,
    pub store: Arc<dyn ReportStore>,
}

impl std::fmt::Debug for InventorySources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventorySources").finish_non_exhaustive()
    }
}

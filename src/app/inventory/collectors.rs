//! Per-Function Collectors
//!
//! Five independent lookups run for every function. None of them can fail
//! the run: each goes through [`or_fallback`], which logs the error and
//! substitutes a fixed default (`No`, `0`, `N/A`, `{}`).

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use std::future::Future;
use tracing::warn;

use crate::app::aws_services::{FunctionCatalog, LogsReader, MetricsReader, RoleDirectory};
use crate::app::inventory::types::{
    format_epoch_millis, format_timestamp, log_group_name, role_name_from_arn, LastSuccessTime,
    LogGroupStatus, MetricTotals, MetricWindow, RoleInfo, TagSet,
};
use crate::app::sdk_errors::categorize_error;

pub const INVOCATIONS_METRIC: &str = "Invocations";
pub const ERRORS_METRIC: &str = "Errors";

/// Await a best-effort lookup, returning `fallback` if it fails
pub async fn or_fallback<T, F>(collector: &str, function_name: &str, fallback: T, query: F) -> T
where
    F: Future<Output = Result<T>>,
{
    match query.await {
        Ok(value) => value,
        Err(err) => {
            let category = categorize_error(&err);
            warn!(
                collector,
                function = function_name,
                category = category.short_label(),
                error_code = category.error_code().unwrap_or("-"),
                "Lookup failed, using default: {:#}",
                err
            );
            fallback
        }
    }
}

/// Check whether `/aws/lambda/<function>` exists and when it was created.
///
/// The prefix query also returns longer sibling names, so only an exact
/// match counts.
pub async fn check_log_group(logs: &dyn LogsReader, function_name: &str) -> LogGroupStatus {
    let group_name = log_group_name(function_name);

    or_fallback("log_group", function_name, LogGroupStatus::NotEnabled, async {
        let groups = logs.find_log_groups(&group_name).await?;
        let Some(group) = groups.into_iter().find(|group| group.name == group_name) else {
            return Ok(LogGroupStatus::NotEnabled);
        };

        let created_at = group
            .creation_time
            .and_then(format_epoch_millis)
            .with_context(|| format!("Log group {} has no creation time", group_name))?;
        Ok(LogGroupStatus::Enabled { created_at })
    })
    .await
}

/// Sum invocations and errors over `window`.
///
/// Either query failing zeroes both totals.
pub async fn collect_metric_totals(
    metrics: &dyn MetricsReader,
    function_name: &str,
    window: &MetricWindow,
) -> MetricTotals {
    or_fallback("metrics", function_name, MetricTotals::default(), async {
        let invocations = metrics
            .sum_datapoints(function_name, INVOCATIONS_METRIC, window)
            .await?;
        let errors = metrics
            .sum_datapoints(function_name, ERRORS_METRIC, window)
            .await?;
        Ok(MetricTotals::from_datapoints(&invocations, &errors))
    })
    .await
}

/// Last event time of the most recently written log stream
pub async fn resolve_last_success(logs: &dyn LogsReader, function_name: &str) -> LastSuccessTime {
    let group_name = log_group_name(function_name);

    or_fallback("last_success", function_name, LastSuccessTime::Unavailable, async {
        Ok(logs
            .latest_event_timestamp(&group_name)
            .await?
            .and_then(format_epoch_millis)
            .map_or(LastSuccessTime::Unavailable, LastSuccessTime::At))
    })
    .await
}

pub async fn resolve_tags(
    catalog: &dyn FunctionCatalog,
    function_name: &str,
    function_arn: &str,
) -> TagSet {
    or_fallback(
        "tags",
        function_name,
        TagSet::new(),
        catalog.list_tags(function_arn),
    )
    .await
}

/// Resolve the execution role's name and last-used date.
///
/// Any failure reports both fields as `N/A`, including the name.
pub async fn resolve_role_info(
    roles: &dyn RoleDirectory,
    function_name: &str,
    role_arn: Option<&str>,
) -> RoleInfo {
    or_fallback("role", function_name, RoleInfo::Unavailable, async {
        let role_arn = role_arn.context("Function has no execution role")?;
        let name = role_name_from_arn(role_arn);
        let last_used = roles.role_last_used(name).await?;
        Ok(RoleInfo::Resolved {
            name: name.to_string(),
            last_used: last_used.map(format_timestamp),
        })
    })
    .await
}

//! Inventory Data Types
//!
//! Per-run data model for the Lambda inventory: what the enumerator returns,
//! what each collector produces, and the flattened row written to the report.

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder for a value that could not be resolved
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a role that exists but has never been assumed
pub const NEVER_USED: &str = "Never Used";

/// Log group naming convention for Lambda functions
pub const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// Timestamp layout used for every date column in the report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Conventional log group name for a function
pub fn log_group_name(function_name: &str) -> String {
    format!("{}{}", LAMBDA_LOG_GROUP_PREFIX, function_name)
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Format a Unix timestamp in milliseconds, as returned by CloudWatch Logs
pub fn format_epoch_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(format_timestamp)
}

/// Static metadata for one deployed function, as listed by Lambda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: String,
    pub runtime: String,
    pub last_modified: String,
    /// Execution role ARN; absent only for malformed listings
    pub role_arn: Option<String>,
    pub function_arn: String,
}

/// Whether the function's conventional log group exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogGroupStatus {
    Enabled { created_at: String },
    NotEnabled,
}

impl LogGroupStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, LogGroupStatus::Enabled { .. })
    }

    pub fn enabled_label(&self) -> &'static str {
        if self.is_enabled() {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn creation_date(&self) -> &str {
        match self {
            LogGroupStatus::Enabled { created_at } => created_at,
            LogGroupStatus::NotEnabled => NOT_AVAILABLE,
        }
    }
}

/// Invocation and error totals over the metric window.
///
/// A failed metric query also yields zeros, so a zero here does not prove
/// the function was idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricTotals {
    pub invocations: u64,
    pub errors: u64,
}

impl MetricTotals {
    /// Sum per-bucket datapoints, discarding any fractional part of the total
    pub fn from_datapoints(invocations: &[f64], errors: &[f64]) -> Self {
        Self {
            invocations: truncate_sum(invocations),
            errors: truncate_sum(errors),
        }
    }
}

fn truncate_sum(datapoints: &[f64]) -> u64 {
    let total: f64 = datapoints.iter().sum();
    if total.is_finite() && total > 0.0 {
        total.trunc() as u64
    } else {
        0
    }
}

/// Most recent log activity for a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastSuccessTime {
    At(String),
    Unavailable,
}

impl fmt::Display for LastSuccessTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastSuccessTime::At(timestamp) => f.write_str(timestamp),
            LastSuccessTime::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Function tags, ordered by key so rows are stable across runs
pub type TagSet = BTreeMap<String, String>;

/// Render tags as `{key=value, key2=value2}`
pub fn render_tags(tags: &TagSet) -> String {
    let pairs: Vec<String> = tags
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

/// Execution role name and last-used date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleInfo {
    Resolved {
        name: String,
        /// `None` when the role has never been assumed
        last_used: Option<String>,
    },
    Unavailable,
}

impl RoleInfo {
    pub fn name(&self) -> &str {
        match self {
            RoleInfo::Resolved { name, .. } => name,
            RoleInfo::Unavailable => NOT_AVAILABLE,
        }
    }

    pub fn last_used(&self) -> &str {
        match self {
            RoleInfo::Resolved {
                last_used: Some(date),
                ..
            } => date,
            RoleInfo::Resolved {
                last_used: None, ..
            } => NEVER_USED,
            RoleInfo::Unavailable => NOT_AVAILABLE,
        }
    }
}

/// Short role name from an IAM role ARN (the final path segment)
pub fn role_name_from_arn(role_arn: &str) -> &str {
    role_arn.rsplit('/').next().unwrap_or(role_arn)
}

/// Historical range the invocation and error totals are summed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period_seconds: i32,
}

impl MetricWindow {
    pub fn ending_at(end: DateTime<Utc>, lookback: Duration, period_seconds: i32) -> Self {
        Self {
            start: end - lookback,
            end,
            period_seconds,
        }
    }
}

/// One report row. Field order is the column order of the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryRecord {
    pub function_name: String,
    pub runtime: String,
    pub last_modified: String,
    pub log_group_enabled: String,
    pub log_group_creation_date: String,
    pub total_invocations: u64,
    pub total_errors: u64,
    pub last_success_time: String,
    pub tags: String,
    pub execution_role: String,
    pub role_last_used_date: String,
}

/// All rows of one run, in enumerator order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryReport {
    pub records: Vec<InventoryRecord>,
}

impl InventoryReport {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Inventory Configuration
//!
//! Settings are read from the Lambda environment once per cold start.
//!
//! | Variable | Default |
//! |---|---|
//! | `S3_BUCKET_NAME` | required |
//! | `INVENTORY_FUNCTION_NAMES` | empty (all functions) |
//! | `INVENTORY_LOOKBACK_DAYS` | 730 (at most 3650) |
//! | `INVENTORY_METRIC_PERIOD_SECONDS` | 2592000 (30 days); multiple of 60, at most 1440 buckets |
//! | `INVENTORY_REPORT_PREFIX` | `lambda-inventory-reports` |
//! | `INVENTORY_CONCURRENCY` | 1 |
//! | `AWS_REGION` | SDK default chain |

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{bail, Context, Result};
use chrono::Duration;
use std::str::FromStr;

pub const BUCKET_ENV: &str = "S3_BUCKET_NAME";
pub const FUNCTION_NAMES_ENV: &str = "INVENTORY_FUNCTION_NAMES";
pub const LOOKBACK_DAYS_ENV: &str = "INVENTORY_LOOKBACK_DAYS";
pub const METRIC_PERIOD_ENV: &str = "INVENTORY_METRIC_PERIOD_SECONDS";
pub const REPORT_PREFIX_ENV: &str = "INVENTORY_REPORT_PREFIX";
pub const CONCURRENCY_ENV: &str = "INVENTORY_CONCURRENCY";
pub const REGION_ENV: &str = "AWS_REGION";

pub const DEFAULT_LOOKBACK_DAYS: i64 = 730;
pub const DEFAULT_METRIC_PERIOD_SECONDS: i32 = 86_400 * 30;
pub const DEFAULT_REPORT_PREFIX: &str = "lambda-inventory-reports";

/// Upper bound on the metric window, well past CloudWatch's 15-month retention
pub const MAX_LOOKBACK_DAYS: i64 = 3650;
/// `GetMetricStatistics` rejects requests that would return more datapoints
pub const MAX_METRIC_DATAPOINTS: i64 = 1440;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Destination bucket for the CSV report
    pub bucket: String,
    /// Function names to restrict the report to; empty means every function
    pub function_names: Vec<String>,
    pub lookback_days: i64,
    pub metric_period_seconds: i32,
    pub report_prefix: String,
    /// How many functions are collected at once; 1 keeps the run strictly sequential
    pub concurrency: usize,
    pub region: Option<String>,
}

impl InventoryConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            function_names: Vec::new(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            metric_period_seconds: DEFAULT_METRIC_PERIOD_SECONDS,
            report_prefix: DEFAULT_REPORT_PREFIX.to_string(),
            concurrency: 1,
            region: None,
        }
    }

    pub fn with_function_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.function_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn lookback(&self) -> Duration {
        Duration::days(self.lookback_days)
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = lookup(BUCKET_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{} must be set to the report bucket name", BUCKET_ENV))?;

        let mut config = Self::new(bucket);

        if let Some(names) = lookup(FUNCTION_NAMES_ENV) {
            config.function_names = parse_name_list(&names);
        }
        if let Some(days) = lookup(LOOKBACK_DAYS_ENV) {
            config.lookback_days = parse_positive(LOOKBACK_DAYS_ENV, &days)?;
        }
        if let Some(period) = lookup(METRIC_PERIOD_ENV) {
            config.metric_period_seconds = parse_positive(METRIC_PERIOD_ENV, &period)?;
        }
        if let Some(prefix) = lookup(REPORT_PREFIX_ENV) {
            let prefix = prefix.trim().trim_end_matches('/');
            if prefix.is_empty() {
                bail!("{} must not be empty", REPORT_PREFIX_ENV);
            }
            config.report_prefix = prefix.to_string();
        }
        if let Some(concurrency) = lookup(CONCURRENCY_ENV) {
            config.concurrency = parse_positive(CONCURRENCY_ENV, &concurrency)?;
        }
        config.region = lookup(REGION_ENV).filter(|region| !region.trim().is_empty());

        config.validate_metric_window()?;
        Ok(config)
    }

    /// Reject window settings CloudWatch would refuse, which would otherwise
    /// surface as zero totals for every function
    pub fn validate_metric_window(&self) -> Result<()> {
        if self.lookback_days <= 0 || self.lookback_days > MAX_LOOKBACK_DAYS {
            bail!(
                "{} must be between 1 and {}, got {}",
                LOOKBACK_DAYS_ENV,
                MAX_LOOKBACK_DAYS,
                self.lookback_days
            );
        }

        let period = i64::from(self.metric_period_seconds);
        if period <= 0 || period % 60 != 0 {
            bail!(
                "{} must be a positive multiple of 60, got {}",
                METRIC_PERIOD_ENV,
                period
            );
        }

        let window_seconds = self.lookback_days * 86_400;
        let datapoints = (window_seconds + period - 1) / period;
        if datapoints > MAX_METRIC_DATAPOINTS {
            bail!(
                "{}={} over {} days yields {} datapoints; CloudWatch allows at most {}",
                METRIC_PERIOD_ENV,
                period,
                self.lookback_days,
                datapoints,
                MAX_METRIC_DATAPOINTS
            );
        }

        Ok(())
    }
}

/// Split a comma separated list of function names, dropping blanks
fn parse_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parsed: T = value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number, got {:?}", key, value))?;
    if parsed <= T::default() {
        bail!("{} must be greater than zero, got {:?}", key, value);
    }
    Ok(parsed)
}

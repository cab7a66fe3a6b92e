//! Report Writer
//!
//! Encodes the inventory as CSV and uploads it as a single S3 object under a
//! key stamped with the generation time, so every run adds a new object.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::app::aws_services::ReportStore;
use crate::app::inventory::types::InventoryReport;

/// Column header, in the order every row is written
pub const REPORT_COLUMNS: [&str; 11] = [
    "FunctionName",
    "Runtime",
    "LastModified",
    "LogGroupEnabled",
    "LogGroupCreationDate",
    "TotalInvocations",
    "TotalErrors",
    "LastSuccessTime",
    "Tags",
    "ExecutionRole",
    "RoleLastUsedDate",
];

/// Where a report was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub bucket: String,
    pub key: String,
}

impl fmt::Display for ReportLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// `<prefix>/lambda_inventory_report_<YYYY-MM-DD_HH-MM-SS>.csv`
pub fn report_key(prefix: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}/lambda_inventory_report_{}.csv",
        prefix,
        generated_at.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Encode the report as CSV: header row, then one row per record
pub fn encode_csv(report: &InventoryReport) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(REPORT_COLUMNS)
        .context("Failed to write report header")?;
    for record in &report.records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to encode row for {}", record.function_name))?;
    }

    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV report: {}", err.error()))
}

pub struct ReportWriter {
    store: Arc<dyn ReportStore>,
    bucket: String,
    prefix: String,
}

impl ReportWriter {
    pub fn new(store: Arc<dyn ReportStore>, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Encode and upload `report`. Nothing is written if encoding fails.
    pub async fn write(
        &self,
        report: &InventoryReport,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportLocation> {
        let body = encode_csv(report)?;
        let location = ReportLocation {
            bucket: self.bucket.clone(),
            key: report_key(&self.prefix, generated_at),
        };

        self.store
            .put_report(&location.bucket, &location.key, body)
            .await
            .with_context(|| format!("Failed to store inventory report at {}", location))?;

        info!("Report uploaded to {} ({} rows)", location, report.len());
        Ok(location)
    }
}

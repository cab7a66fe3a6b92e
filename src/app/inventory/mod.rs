//! Lambda Inventory
//!
//! Builds a point-in-time report of every Lambda function in the account
//! and stores it as CSV in S3.
//!
//! ```text
//! enumerator ──► collectors (per function) ──► assembler ──► report
//!   Lambda        Logs, CloudWatch, Lambda, IAM                 S3
//! ```
//!
//! [`pipeline::InventoryPipeline`] drives the stages in that order.

#![warn(clippy::all, rust_2018_idioms)]

pub mod assembler;
pub mod collectors;
pub mod enumerator;
pub mod pipeline;
pub mod report;
pub mod types;

pub use pipeline::{Clock, InventoryPipeline, RunSummary, SystemClock};
pub use report::{ReportLocation, REPORT_COLUMNS};
pub use types::{InventoryRecord, InventoryReport};

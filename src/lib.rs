//! Lambda Inventory - point-in-time inventory of AWS Lambda functions
//!
//! Runs as a scheduled Lambda function. Each invocation lists every function
//! in the account (or an allow-listed subset), gathers operational metadata
//! for each one, and uploads the result to S3 as a CSV report.
//!
//! # Report Columns
//!
//! | Column | Source |
//! |---|---|
//! | `FunctionName`, `Runtime`, `LastModified` | Lambda `ListFunctions` |
//! | `LogGroupEnabled`, `LogGroupCreationDate` | CloudWatch Logs `DescribeLogGroups` |
//! | `TotalInvocations`, `TotalErrors` | CloudWatch `GetMetricStatistics`, two-year window |
//! | `LastSuccessTime` | CloudWatch Logs `DescribeLogStreams` |
//! | `Tags` | Lambda `ListTags` |
//! | `ExecutionRole`, `RoleLastUsedDate` | IAM `GetRole` |
//!
//! Lookups behind every column except the first three are best effort: a
//! failure fills the column with its default (`No`, `0`, `N/A`, `{}`) and the
//! run continues. Listing functions and uploading the report are not; either
//! failing fails the invocation and no report is written.
//!
//! # Module Organization
//!
//! - [`app::config`] - environment configuration
//! - [`app::aws_clients`] - SDK config and client construction
//! - [`app::aws_services`] - service traits and their SDK implementations
//! - [`app::inventory`] - enumeration, collection, assembly and report writing
//! - [`app::sdk_errors`] - error categorization for fallback logging

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;

pub use app::config::InventoryConfig;
pub use app::inventory::{InventoryPipeline, RunSummary};

//! Core application modules for the Lambda inventory.
//!
//! # Module Organization
//!
//! ## AWS Integration
//! - [`aws_clients`] - shared SDK config and per-service clients
//! - [`aws_services`] - one trait per AWS API family, with SDK-backed implementations
//! - [`sdk_errors`] - categorizes SDK errors swallowed by best-effort lookups
//!
//! ## Inventory
//! - [`config`] - run configuration from the Lambda environment
//! - [`inventory`] - the enumerate, collect, assemble, write pipeline

pub mod aws_clients;
pub mod aws_services;
pub mod config;
pub mod inventory;
pub mod sdk_errors;

//! Client bindings for Fastly BigQuery logging endpoints
//!
//! - [`fastly`] - API client and the typed BigQuery logging operations
//! - [`config`] - Persistent settings shared with the CLI

pub mod config;
pub mod fastly;

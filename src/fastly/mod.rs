//! Fastly API interaction module
//!
//! This module provides the core functionality for talking to the Fastly
//! configuration API: credentials, the HTTP client, and the typed bindings
//! for BigQuery logging endpoints.
//!
//! # Module Structure
//!
//! - [`auth`] - API key resolution
//! - [`client`] - Main Fastly client for building paths and making requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`error`] - Typed validation and acknowledgment errors
//! - [`status`] - Status acknowledgment responses
//! - [`bigquery`] - BigQuery logging endpoint operations
//!
//! # Example
//!
//! ```ignore
//! use fastly_logging::fastly::bigquery::{list_bigqueries, ListBigQueryInput};
//! use fastly_logging::fastly::client::FastlyClient;
//!
//! async fn example(client: &FastlyClient) -> anyhow::Result<()> {
//!     let input = ListBigQueryInput::new("SU1Z0isxPaozGVKXdv0eY", 3);
//!     let endpoints = list_bigqueries(client, &input).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod bigquery;
pub mod client;
pub mod error;
pub mod http;
pub mod status;

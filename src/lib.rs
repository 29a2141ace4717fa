//! # SGSST Connector
//!
//! A reporting data connector for the SGSST API. It logs in with stored
//! credentials, infers a tabular schema from a sample of an endpoint and
//! reshapes the endpoint's records into rows for the requested fields.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sgsst_connector::{Connector, Settings};
//! use sgsst_connector::connector::GetSchemaRequest;
//!
//! #[tokio::main]
//! async fn main() -> sgsst_connector::Result<()> {
//!     let connector = Connector::from_settings(Settings::default())?;
//!
//!     let request: GetSchemaRequest = serde_json::from_value(serde_json::json!({
//!         "configParams": {
//!             "company_id": "7",
//!             "username": "ana",
//!             "password": "secret",
//!             "endpoint": "/pesv/vehiculo"
//!         }
//!     }))?;
//!     let schema = connector.get_schema(&request).await?;
//!     println!("{} fields", schema.schema.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Connector                                │
//! │  getAuthType  getConfig  setCredentials  getSchema  getData     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │    Schema     │   Fetch   │    Store    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Login    │ Bearer    │ Inference     │ Decode    │ Memory      │
//! │ Token    │ JSON      │ Lookup        │ Project   │ File        │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and the error reporter
pub mod error;

/// Identifier normalization
pub mod ident;

/// Settings and configuration screen
pub mod config;

/// Login and session tokens
pub mod auth;

/// HTTP client
pub mod http;

/// Response decoders
pub mod decode;

/// Row fetching and projection
pub mod fetch;

/// Schema inference and lookup
pub mod schema;

/// Property storage
pub mod store;

/// Connector entry points
pub mod connector;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Settings;
pub use connector::Connector;
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

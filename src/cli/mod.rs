//! CLI module
//!
//! Command-line interface for driving the connector.
//!
//! # Commands
//!
//! - `auth-type` / `config` - Describe authentication and the config screen
//! - `set-credentials` / `reset-auth` - Manage stored credentials
//! - `check` - Test the stored credentials against the API
//! - `schema` - Infer and store the endpoint schema
//! - `data` - Fetch rows for selected fields
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat, ParamArgs};
pub use runner::Runner;
pub use server::{router, serve};

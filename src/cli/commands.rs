//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SGSST reporting connector CLI
#[derive(Parser, Debug)]
#[command(name = "sgsst-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory holding the per-user property files
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// User whose properties are read and written
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection parameters shared by `schema` and `data`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Company identifier
    #[arg(long)]
    pub company_id: Option<String>,

    /// API username
    #[arg(long)]
    pub username: Option<String>,

    /// API password
    #[arg(long, env = "SGSST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Endpoint path, e.g. /pesv/vehiculo
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Inline config params JSON (overridden by the flags above)
    #[arg(long)]
    pub config_json: Option<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the authentication method
    AuthType,

    /// Show the configuration screen definition
    Config,

    /// Store username and password
    SetCredentials {
        #[arg(long)]
        username: String,

        #[arg(long, env = "SGSST_PASSWORD", hide_env_values = true)]
        password: String,

        /// Also store the company identifier
        #[arg(long)]
        company_id: Option<String>,
    },

    /// Forget stored credentials, token and schema
    ResetAuth,

    /// Check whether the stored credentials log in
    Check,

    /// Infer and store the schema of an endpoint
    Schema {
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Fetch rows for the requested fields
    Data {
        /// Fields to fetch (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        fields: Vec<String>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

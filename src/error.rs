//! Error types for the SGSST connector
//!
//! Every component returns `Result<T, Error>`. A failed request is terminal:
//! the error travels up with `?` to the request handler, which turns it into
//! an [`ErrorReport`] through [`report_error`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// The main error type for the connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Schema inference failed: {message}")]
    SchemaInference { message: String },

    #[error("Field '{name}' not found in schema")]
    FieldNotFound { name: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a schema inference error
    pub fn schema_inference(message: impl Into<String>) -> Self {
        Self::SchemaInference {
            message: message.into(),
        }
    }

    /// Create a field-not-found error
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Stable code reported to the front-end
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::Config { .. } | Error::MissingConfigField { .. } => {
                ErrorCode::MissingConfiguration
            }
            Error::Auth { .. } => ErrorCode::InvalidCredentials,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::JsonParse(_)
            | Error::JsonPath { .. }
            | Error::Decode { .. }
            | Error::SchemaInference { .. } => ErrorCode::FetchFailed,
            Error::FieldNotFound { .. } => ErrorCode::FieldNotFound,
            Error::YamlParse(_)
            | Error::InvalidUrl(_)
            | Error::Storage { .. }
            | Error::Io(_)
            | Error::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Message shown to the end user
    pub fn user_message(&self) -> String {
        match self {
            Error::Config { .. } | Error::MissingConfigField { .. } => {
                "Please enter all required fields".to_string()
            }
            Error::Auth { .. } => "Invalid credentials".to_string(),
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::JsonParse(_)
            | Error::JsonPath { .. }
            | Error::Decode { .. } => "Unable to fetch data from source".to_string(),
            Error::SchemaInference { .. } => "Unable to infer the data schema".to_string(),
            Error::FieldNotFound { name } => format!("Field not found: {name}"),
            _ => "Internal connector error".to_string(),
        }
    }
}

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

// ============================================================================
// Error Reporter
// ============================================================================

/// Error category exposed to the reporting front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingConfiguration,
    InvalidCredentials,
    FetchFailed,
    FieldNotFound,
    InternalError,
}

/// User-facing error with a separate debug channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error_code: ErrorCode,
    pub error_message: String,
    pub debug_details: String,
}

impl ErrorReport {
    /// Build a report; the debug channel falls back to the user message
    pub fn new(code: ErrorCode, message: impl Into<String>, debug_detail: Option<String>) -> Self {
        let message = message.into();
        Self {
            error_code: code,
            debug_details: debug_detail.unwrap_or_else(|| message.clone()),
            error_message: message,
        }
    }
}

/// Surface an error to the user and the debug log
///
/// The underlying error text goes to the debug channel; the user only sees
/// the category message.
pub fn report_error(err: &Error) -> ErrorReport {
    let detail = err.to_string();
    let report = ErrorReport::new(err.error_code(), err.user_message(), Some(detail));

    error!(code = ?report.error_code, "{}", report.error_message);
    debug!("{}", report.debug_details);

    report
}

//! Request and response types of the front-end protocol

use crate::config::ConfigParams;
use crate::error::{report_error, ErrorReport, Result};
use crate::fetch::{FieldRequest, Row};
use crate::schema::{FieldDescriptor, Schema};
use serde::{Deserialize, Serialize};

/// Authentication method advertised to the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    UserPass,
}

/// Response of `getAuthType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTypeResponse {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    pub help_url: String,
}

/// Username/password pair sent by the front-end
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPass {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UserPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPass")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Request of `setCredentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCredentialsRequest {
    pub user_pass: UserPass,
    /// Stored alongside the credentials when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

/// Response of `setCredentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCredentialsResponse {
    pub error_code: String,
}

impl SetCredentialsResponse {
    /// The "no error" response
    pub fn none() -> Self {
        Self {
            error_code: "NONE".to_string(),
        }
    }
}

/// Request of `getSchema`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSchemaRequest {
    #[serde(default)]
    pub config_params: Option<ConfigParams>,
}

/// Response of `getSchema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSchemaResponse {
    pub schema: Schema,
}

/// Request of `getData`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataRequest {
    #[serde(default)]
    pub fields: Vec<FieldRequest>,
    #[serde(default)]
    pub config_params: Option<ConfigParams>,
}

/// Response of `getData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetDataResponse {
    pub schema: Vec<FieldDescriptor>,
    pub rows: Vec<Row>,
}

/// Outcome of an entry point in the external protocol shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectorResponse<T> {
    Ok(T),
    Error(ErrorReport),
}

impl<T> ConnectorResponse<T> {
    /// Map a result, reporting the failure if there is one
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Error(report_error(&e)),
        }
    }
}

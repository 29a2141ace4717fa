//! Authenticator implementation
//!
//! Handles the login call. Failures never propagate: any problem with the
//! call or its response means "not authenticated".

use super::types::{Credentials, LoginRequest, SessionToken};
use crate::config::Settings;
use crate::decode::extract_simple_path;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::store::CredentialStore;
use serde_json::Value;
use tracing::{debug, warn};

/// Authenticator performs the login call against the API
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// HTTP client for the login call
    http_client: HttpClient,
    /// Absolute login URL
    login_url: String,
    /// Path of the session payload in the response
    token_path: String,
}

impl Authenticator {
    /// Create an authenticator from connector settings
    pub fn new(settings: &Settings, http_client: HttpClient) -> Self {
        Self {
            http_client,
            login_url: settings.login_url(),
            token_path: settings.token_path.clone(),
        }
    }

    /// Log in, returning `None` on any failure
    ///
    /// Empty arguments short-circuit without a network call. Network,
    /// status and decode failures are logged and reported as `None`; callers
    /// cannot tell them apart from rejected credentials.
    pub async fn login(
        &self,
        company_id: &str,
        username: &str,
        password: &str,
    ) -> Option<SessionToken> {
        let credentials = Credentials::new(company_id, username, password);
        if !credentials.is_complete() {
            debug!("Login skipped: incomplete credentials");
            return None;
        }

        match self.fetch_session(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Login request failed: {e}");
                None
            }
        }
    }

    /// Log in, turning a failed login into [`Error::Auth`]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<SessionToken> {
        self.login(
            &credentials.company_id,
            &credentials.username,
            &credentials.password,
        )
        .await
        .ok_or_else(|| Error::auth("The API rejected the supplied credentials"))
    }

    /// Check whether the stored credentials still log in
    pub async fn is_auth_valid(&self, store: &CredentialStore) -> Result<bool> {
        let stored = store.get_credentials().await?;
        let token = self
            .login(
                stored.company_id.as_deref().unwrap_or_default(),
                stored.username.as_deref().unwrap_or_default(),
                stored.password.as_deref().unwrap_or_default(),
            )
            .await;
        Ok(token.is_some())
    }

    /// Send the login request and extract the session payload
    async fn fetch_session(&self, credentials: &Credentials) -> Result<Option<SessionToken>> {
        let body = serde_json::to_value(LoginRequest::from(credentials))?;
        let response = self.http_client.post(&self.login_url, body).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("Invalid login response: {e}")))?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            debug!("Login rejected by the API");
            return Ok(None);
        }

        Ok(extract_token(&body, &self.token_path).map(SessionToken::new))
    }

    /// Get the login URL
    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

/// Extract the session payload at a record path such as `"data"` or
/// `"$.data.token"`, using the same path syntax as the response decoder
///
/// A string is used as is and an object yields its `token` member. Numbers,
/// arrays and token-less objects are kept as their JSON text. `null`, `false`
/// and empty strings count as no session.
pub fn extract_token(value: &Value, path: &str) -> Option<String> {
    let current = extract_simple_path(value.clone(), path)?;

    match current {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Object(ref map) => match map.get("token") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => Some(current.to_string()),
        },
        other => Some(other.to_string()),
    }
}

//! Authentication types

use serde::{Deserialize, Serialize};

/// Credentials submitted on the configuration screen
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub company_id: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(
        company_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns true if no part is empty
    pub fn is_complete(&self) -> bool {
        !self.company_id.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("company_id", &self.company_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of the login call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub id_empresa: String,
    pub usuario: String,
    pub clave: String,
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            id_empresa: credentials.company_id.clone(),
            usuario: credentials.username.clone(),
            clave: credentials.password.clone(),
        }
    }
}

/// Opaque session token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

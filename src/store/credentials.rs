//! Typed access to the connector's persisted properties

use super::backend::PropertyStore;
use crate::auth::SessionToken;
use crate::error::{Error, Result};
use crate::schema::Schema;
use std::sync::Arc;
use tracing::debug;

/// Property keys
pub mod keys {
    pub const COMPANY_ID: &str = "dscc.company_id";
    pub const USERNAME: &str = "dscc.username";
    pub const PASSWORD: &str = "dscc.password";
    pub const TOKEN: &str = "dscc.token";
    pub const SCHEMA: &str = "dscc.schema";
}

/// Whatever credentials are currently stored; any part may be missing
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub company_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StoredCredentials {
    /// Check if all three parts are present
    pub fn is_complete(&self) -> bool {
        self.company_id.is_some() && self.username.is_some() && self.password.is_some()
    }
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("company_id", &self.company_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Credential store adapter over a [`PropertyStore`]
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn PropertyStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Wrap a property store
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// Store username and password
    pub async fn set_credentials(&self, username: &str, password: &str) -> Result<bool> {
        self.store.set(keys::USERNAME, username).await?;
        self.store.set(keys::PASSWORD, password).await?;
        debug!("Stored credentials for user '{username}'");
        Ok(true)
    }

    /// Store the company id
    pub async fn set_company_id(&self, company_id: &str) -> Result<()> {
        self.store.set(keys::COMPANY_ID, company_id).await
    }

    /// Read back the stored credentials
    pub async fn get_credentials(&self) -> Result<StoredCredentials> {
        Ok(StoredCredentials {
            company_id: self.store.get(keys::COMPANY_ID).await?,
            username: self.store.get(keys::USERNAME).await?,
            password: self.store.get(keys::PASSWORD).await?,
        })
    }

    /// Forget username and password
    ///
    /// The company id stays in place; it is only ever overwritten by the next
    /// configuration.
    pub async fn reset_credentials(&self) -> Result<()> {
        self.store.delete(keys::USERNAME).await?;
        self.store.delete(keys::PASSWORD).await?;
        debug!("Reset stored credentials");
        Ok(())
    }

    /// Store the session token
    pub async fn set_token(&self, token: &SessionToken) -> Result<()> {
        self.store.set(keys::TOKEN, token.as_str()).await
    }

    /// Read the session token
    pub async fn get_token(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .store
            .get(keys::TOKEN)
            .await?
            .filter(|t| !t.is_empty())
            .map(SessionToken::new))
    }

    /// Persist the schema as a JSON array
    pub async fn set_schema(&self, schema: &Schema) -> Result<()> {
        let json = serde_json::to_string(schema).map_err(|e| Error::Storage {
            message: format!("Failed to serialize schema: {e}"),
        })?;
        self.store.set(keys::SCHEMA, &json).await
    }

    /// Load the persisted schema
    pub async fn get_schema(&self) -> Result<Option<Schema>> {
        match self.store.get(keys::SCHEMA).await? {
            Some(json) => {
                let schema = serde_json::from_str(&json).map_err(|e| Error::Storage {
                    message: format!("Failed to parse stored schema: {e}"),
                })?;
                Ok(Some(schema))
            }
            None => Ok(None),
        }
    }

    /// Drop the token and schema so the next request derives them again
    pub async fn clear_session(&self) -> Result<()> {
        self.store.delete(keys::TOKEN).await?;
        self.store.delete(keys::SCHEMA).await
    }
}

//! Connector entry points
//!
//! [`Connector`] wires the components together and implements the calls the
//! reporting front-end makes: auth type, configuration screen, credential
//! management, schema discovery and data retrieval.
//!
//! ```text
//!   getSchema: validate params ─► login ─► store token ─► infer ─► store schema
//!   getData:   validate params ─► stored schema ─► resolve fields ─► fetch rows
//! ```

mod types;

pub use types::{
    AuthType, AuthTypeResponse, ConnectorResponse, GetDataRequest, GetDataResponse,
    GetSchemaRequest, GetSchemaResponse, SetCredentialsRequest, SetCredentialsResponse, UserPass,
};

use crate::auth::{Authenticator, Credentials, SessionToken};
use crate::config::{ConfigParams, ConfigSpec, Settings, ValidatedParams};
use crate::error::{Error, Result};
use crate::fetch::{DataFetcher, FieldRequest};
use crate::http::{HttpClient, HttpClientConfig};
use crate::schema::{resolve_fields, Schema, SchemaInferrer};
use crate::store::{CredentialStore, FileStore, MemoryStore, PropertyStore};
use std::sync::Arc;
use tracing::{debug, info};

/// The SGSST data connector
#[derive(Debug, Clone)]
pub struct Connector {
    settings: Settings,
    authenticator: Authenticator,
    fetcher: DataFetcher,
    inferrer: SchemaInferrer,
    store: CredentialStore,
}

impl Connector {
    /// Create a connector over an explicit property store
    pub fn new(settings: Settings, properties: Arc<dyn PropertyStore>) -> Result<Self> {
        settings.validate()?;

        let http_client = HttpClient::with_config(HttpClientConfig::from_settings(&settings))?;
        let authenticator = Authenticator::new(&settings, http_client.clone());
        let fetcher = DataFetcher::new(&settings, http_client);
        let inferrer = SchemaInferrer::new(fetcher.clone());

        Ok(Self {
            settings,
            authenticator,
            fetcher,
            inferrer,
            store: CredentialStore::new(properties),
        })
    }

    /// Create a connector whose store follows the settings: a per-user file
    /// when `store_path` is set, memory otherwise
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let properties: Arc<dyn PropertyStore> = match &settings.store_path {
            Some(dir) => Arc::new(FileStore::for_user(dir, &settings.user)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::new(settings, properties)
    }

    /// Get the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the credential store
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authentication method and help link
    pub fn get_auth_type(&self) -> AuthTypeResponse {
        AuthTypeResponse {
            auth_type: AuthType::UserPass,
            help_url: crate::config::join_url(&self.settings.base_url, "/api-docs"),
        }
    }

    /// Store the submitted username and password
    pub async fn set_credentials(
        &self,
        request: &SetCredentialsRequest,
    ) -> Result<SetCredentialsResponse> {
        self.store
            .set_credentials(&request.user_pass.username, &request.user_pass.password)
            .await?;
        if let Some(company_id) = request.company_id.as_deref().filter(|c| !c.is_empty()) {
            self.store.set_company_id(company_id).await?;
        }
        Ok(SetCredentialsResponse::none())
    }

    /// Whether the stored credentials still log in
    pub async fn is_auth_valid(&self) -> Result<bool> {
        self.authenticator.is_auth_valid(&self.store).await
    }

    /// Forget username, password, token and schema
    pub async fn reset_auth(&self) -> Result<()> {
        self.store.reset_credentials().await?;
        self.store.clear_session().await?;
        info!("Authentication reset");
        Ok(())
    }

    /// Every user may administer the connector
    pub fn is_admin_user(&self) -> bool {
        true
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// The configuration screen
    pub fn get_config(&self) -> ConfigSpec {
        ConfigSpec::new()
            .info(
                "instructions",
                "Enter your API credentials and select the fields you want to display.",
            )
            .text_input("Company ID", "Enter your Company ID", true, false)
            .text_input("Username", "Enter your API username", true, false)
            .text_input("Password", "Enter your API password", true, false)
            .text_input(
                "Endpoint",
                format!(
                    "Enter the endpoint for fetching data. Default is {}",
                    self.settings.default_endpoint
                ),
                true,
                true,
            )
    }

    // ========================================================================
    // Schema
    // ========================================================================

    /// Log in, sample the endpoint and persist the inferred schema
    pub async fn get_schema(&self, request: &GetSchemaRequest) -> Result<GetSchemaResponse> {
        let params = validate_params(request.config_params.as_ref())?;

        let token = self.login(&params).await?;
        let schema = self
            .inferrer
            .infer_and_store(&params.endpoint, &token, &self.store)
            .await?;

        Ok(GetSchemaResponse { schema })
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Resolve the requested fields and fetch their rows
    ///
    /// Fields resolve against the user's persisted schema, which is not tied
    /// to an endpoint: after `get_schema` samples one endpoint, a request for
    /// another endpoint still resolves against that schema until `get_schema`
    /// runs for the new endpoint.
    pub async fn get_data(&self, request: &GetDataRequest) -> Result<GetDataResponse> {
        let params = validate_params(request.config_params.as_ref())?;

        let (schema, token) = self.session(&params).await?;
        let fields = resolve_fields(&schema, &request.fields)?;
        let requests: Vec<FieldRequest> = fields.iter().map(FieldRequest::from).collect();

        let rows = self
            .fetcher
            .fetch_rows(&params.endpoint, &token, &requests)
            .await?;
        debug!("Returning {} rows with {} fields", rows.len(), fields.len());

        Ok(GetDataResponse {
            schema: fields,
            rows,
        })
    }

    /// Persisted schema and token, deriving whatever is missing
    async fn session(&self, params: &ValidatedParams) -> Result<(Schema, SessionToken)> {
        let stored_token = self.store.get_token().await?;
        let stored_schema = self.store.get_schema().await?;

        match (stored_schema, stored_token) {
            (Some(schema), Some(token)) => Ok((schema, token)),
            (Some(schema), None) => Ok((schema, self.login(params).await?)),
            (None, token) => {
                let token = match token {
                    Some(token) => token,
                    None => self.login(params).await?,
                };
                let schema = self
                    .inferrer
                    .infer_and_store(&params.endpoint, &token, &self.store)
                    .await?;
                Ok((schema, token))
            }
        }
    }

    /// Log in with the request's credentials and store the token
    async fn login(&self, params: &ValidatedParams) -> Result<SessionToken> {
        self.store.set_company_id(&params.company_id).await?;

        let credentials = Credentials::new(
            params.company_id.as_str(),
            params.username.as_str(),
            params.password.as_str(),
        );
        let token = self.authenticator.authenticate(&credentials).await?;
        self.store.set_token(&token).await?;
        Ok(token)
    }
}

fn validate_params(params: Option<&ConfigParams>) -> Result<ValidatedParams> {
    params
        .ok_or_else(|| Error::config("Request has no configuration parameters"))?
        .validate()
}

#[cfg(test)]
mod tests;

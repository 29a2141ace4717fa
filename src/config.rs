//! Configuration types
//!
//! Two layers:
//! - [`Settings`] - process configuration (base URL, paths, storage), loaded
//!   from YAML and passed to every component at construction.
//! - [`ConfigParams`] - the per-request parameters the front-end collects on
//!   its configuration screen.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://sgsst.co/api";

/// Login path under the base URL
pub const DEFAULT_LOGIN_PATH: &str = "/seguridad/login";

/// Endpoint suggested on the configuration screen
pub const DEFAULT_ENDPOINT: &str = "/pesv/vehiculo";

// ============================================================================
// Settings
// ============================================================================

/// Process-wide connector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API root, without trailing slash
    pub base_url: String,

    /// Path of the login call
    pub login_path: String,

    /// Endpoint documented as the default on the config screen
    pub default_endpoint: String,

    /// Dot path of the record list in data responses; `None` means the body
    /// itself is the list
    pub record_path: Option<String>,

    /// Dot path of the session payload in the login response
    pub token_path: String,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,

    /// User agent string
    pub user_agent: String,

    /// Property file for persisted credentials; `None` keeps them in memory
    pub store_path: Option<PathBuf>,

    /// User the persisted properties are scoped to
    pub user: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            default_endpoint: DEFAULT_ENDPOINT.to_string(),
            record_path: Some("data".to_string()),
            token_path: "data".to_string(),
            timeout_secs: None,
            user_agent: format!("sgsst-connector/{}", env!("CARGO_PKG_VERSION")),
            store_path: None,
            user: "default".to_string(),
        }
    }
}

impl Settings {
    /// Create a new settings builder
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.token_path.trim().is_empty() {
            return Err(Error::config("token_path must not be empty"));
        }
        if self.user.trim().is_empty() {
            return Err(Error::config("user must not be empty"));
        }
        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Absolute URL of the login call
    pub fn login_url(&self) -> String {
        join_url(&self.base_url, &self.login_path)
    }

    /// Absolute URL of a data endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }
}

/// Builder for [`Settings`]
#[derive(Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = url.into();
        self
    }

    /// Set the login path
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.settings.login_path = path.into();
        self
    }

    /// Set the record path; `None` expects a bare list
    pub fn record_path(mut self, path: Option<&str>) -> Self {
        self.settings.record_path = path.map(String::from);
        self
    }

    /// Set the token path
    pub fn token_path(mut self, path: impl Into<String>) -> Self {
        self.settings.token_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.settings.user_agent = agent.into();
        self
    }

    /// Persist properties to a file
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.store_path = Some(path.into());
        self
    }

    /// Scope persisted properties to a user
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.settings.user = user.into();
        self
    }

    /// Build the settings
    pub fn build(self) -> Settings {
        self.settings
    }
}

/// Join a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

// ============================================================================
// Request Config Params
// ============================================================================

/// Parameters collected by the front-end configuration screen
///
/// Field aliases cover the ids produced by earlier revisions of the
/// configuration screen (`user_name`, `api_url`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigParams {
    #[serde(default)]
    pub company_id: Option<String>,

    #[serde(default, alias = "user_name")]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default, alias = "api_url")]
    pub endpoint: Option<String>,
}

/// Config params after validation
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedParams {
    pub company_id: String,
    pub username: String,
    pub password: String,
    pub endpoint: String,
}

impl std::fmt::Debug for ValidatedParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedParams")
            .field("company_id", &self.company_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ConfigParams {
    /// Require every parameter to be present and non-blank
    ///
    /// Reports the first missing field in declaration order.
    pub fn validate(&self) -> Result<ValidatedParams> {
        fn required(value: &Option<String>, field: &str) -> Result<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .ok_or_else(|| Error::missing_field(field))
        }

        Ok(ValidatedParams {
            company_id: required(&self.company_id, "company_id")?,
            username: required(&self.username, "username")?,
            password: required(&self.password, "password")?,
            endpoint: required(&self.endpoint, "endpoint")?,
        })
    }
}

// ============================================================================
// Configuration Screen
// ============================================================================

/// Kind of configuration entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigEntryType {
    Info,
    TextInput,
}

/// One entry on the configuration screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    #[serde(rename = "type")]
    pub entry_type: ConfigEntryType,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub allow_override: bool,
}

/// The configuration screen definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSpec {
    pub config_params: Vec<ConfigEntry>,
}

impl ConfigSpec {
    /// Create an empty config screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an informational text block
    #[must_use]
    pub fn info(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.config_params.push(ConfigEntry {
            entry_type: ConfigEntryType::Info,
            id: id.into(),
            name: None,
            text: Some(text.into()),
            help_text: None,
            allow_override: false,
        });
        self
    }

    /// Add a text input whose id is the normalized `name`
    ///
    /// Required inputs are labelled with a trailing `*`.
    #[must_use]
    pub fn text_input(
        mut self,
        name: &str,
        help_text: impl Into<String>,
        required: bool,
        allow_override: bool,
    ) -> Self {
        let label = if required {
            format!("{name} *")
        } else {
            name.to_string()
        };
        self.config_params.push(ConfigEntry {
            entry_type: ConfigEntryType::TextInput,
            id: crate::ident::normalize_identifier(name),
            name: Some(label),
            text: None,
            help_text: Some(help_text.into()),
            allow_override,
        });
        self
    }

    /// Find an entry by id
    pub fn entry(&self, id: &str) -> Option<&ConfigEntry> {
        self.config_params.iter().find(|e| e.id == id)
    }
}

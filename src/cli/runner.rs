//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, ParamArgs};
use crate::config::{ConfigParams, Settings};
use crate::connector::{
    Connector, ConnectorResponse, GetDataRequest, GetSchemaRequest, SetCredentialsRequest,
    UserPass,
};
use crate::error::{Error, Result};
use crate::fetch::FieldRequest;
use serde::Serialize;
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;
        let connector = Connector::from_settings(settings)?;

        match &self.cli.command {
            Commands::AuthType => self.output(&connector.get_auth_type()),
            Commands::Config => self.output(&connector.get_config()),
            Commands::SetCredentials {
                username,
                password,
                company_id,
            } => {
                let request = SetCredentialsRequest {
                    user_pass: UserPass {
                        username: username.clone(),
                        password: password.clone(),
                    },
                    company_id: company_id.clone(),
                };
                self.respond(connector.set_credentials(&request).await)
            }
            Commands::ResetAuth => {
                connector.reset_auth().await?;
                self.output(&json!({ "type": "RESET", "status": "ok" }))
            }
            Commands::Check => self.check(&connector).await,
            Commands::Schema { params } => {
                let request = GetSchemaRequest {
                    config_params: Some(self.config_params(params, connector.settings())?),
                };
                self.respond(connector.get_schema(&request).await)
            }
            Commands::Data { fields, params } => {
                let request = GetDataRequest {
                    fields: fields.iter().map(FieldRequest::new).collect(),
                    config_params: Some(self.config_params(params, connector.settings())?),
                };
                self.respond(connector.get_data(&request).await)
            }
            Commands::Serve { port } => crate::cli::serve(connector, *port).await,
        }
    }

    /// Load settings and apply command-line overrides
    fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(store) = &self.cli.store {
            settings.store_path = Some(store.clone());
        }
        if let Some(user) = &self.cli.user {
            settings.user.clone_from(user);
        }
        if let Some(base_url) = &self.cli.base_url {
            settings.base_url.clone_from(base_url);
        }

        Ok(settings)
    }

    /// Merge inline JSON params with the individual flags
    ///
    /// A missing endpoint falls back to the configured default endpoint.
    fn config_params(&self, args: &ParamArgs, settings: &Settings) -> Result<ConfigParams> {
        let mut params: ConfigParams = match &args.config_json {
            Some(json_str) => serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?,
            None => ConfigParams::default(),
        };

        if args.company_id.is_some() {
            params.company_id.clone_from(&args.company_id);
        }
        if args.username.is_some() {
            params.username.clone_from(&args.username);
        }
        if args.password.is_some() {
            params.password.clone_from(&args.password);
        }
        if args.endpoint.is_some() {
            params.endpoint.clone_from(&args.endpoint);
        }
        if params.endpoint.is_none() {
            params.endpoint = Some(settings.default_endpoint.clone());
        }

        Ok(params)
    }

    /// Check the stored credentials
    async fn check(&self, connector: &Connector) -> Result<()> {
        let valid = connector.is_auth_valid().await?;
        let (status, message) = if valid {
            ("SUCCEEDED", "Stored credentials are valid")
        } else {
            ("FAILED", "Stored credentials were rejected or are incomplete")
        };

        self.output(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": status,
                "message": message
            }
        }))
    }

    /// Print an entry point's outcome in the protocol shape
    ///
    /// The error report goes to stdout like any response; the returned
    /// error only carries the exit status.
    fn respond<T: Serialize>(&self, result: Result<T>) -> Result<()> {
        let response = ConnectorResponse::from_result(result);
        self.output(&response)?;

        match response {
            ConnectorResponse::Ok(_) => Ok(()),
            ConnectorResponse::Error(report) => Err(Error::Other(report.error_message)),
        }
    }

    /// Output a message
    fn output<T: Serialize>(&self, msg: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{text}");
        Ok(())
    }
}

//! Data fetcher implementation

use super::types::{FieldRequest, Row};
use crate::auth::SessionToken;
use crate::config::Settings;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use serde_json::Value;
use tracing::debug;

/// Fetches records from the remote API
#[derive(Debug, Clone)]
pub struct DataFetcher {
    http_client: HttpClient,
    decoder: JsonDecoder,
}

impl DataFetcher {
    /// Create a fetcher from connector settings
    pub fn new(settings: &Settings, http_client: HttpClient) -> Self {
        Self {
            http_client,
            decoder: JsonDecoder::from_path(settings.record_path.as_deref()),
        }
    }

    /// Fetch every record at `endpoint`
    ///
    /// One request, no pagination: the endpoint must return the complete
    /// data set.
    pub async fn fetch_records(&self, endpoint: &str, token: &SessionToken) -> Result<Vec<Value>> {
        let body: Value = self
            .http_client
            .get_json_with_config(endpoint, RequestConfig::new().bearer(token.as_str()))
            .await?;

        let records = self.decoder.extract(body)?;
        debug!("Fetched {} records from {}", records.len(), endpoint);
        Ok(records)
    }

    /// Fetch every record at `endpoint` and project it onto `fields`
    pub async fn fetch_rows(
        &self,
        endpoint: &str,
        token: &SessionToken,
        fields: &[FieldRequest],
    ) -> Result<Vec<Row>> {
        let records = self.fetch_records(endpoint, token).await?;
        Ok(records
            .iter()
            .map(|record| project_record(record, fields))
            .collect())
    }
}

/// Build a row from one record
///
/// A field is read under its original label when it has one, then under its
/// name. Keys missing from the record, and records that are not objects,
/// yield `null` values.
pub fn project_record(record: &Value, fields: &[FieldRequest]) -> Row {
    let values = fields
        .iter()
        .map(|field| {
            field
                .label
                .as_deref()
                .and_then(|label| record.get(label))
                .or_else(|| record.get(&field.name))
                .cloned()
                .unwrap_or(Value::Null)
        })
        .collect();
    Row::new(values)
}

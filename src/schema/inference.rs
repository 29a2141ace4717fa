//! Schema inference from a sample record

use super::types::{FieldDescriptor, FieldKind, Schema};
use crate::auth::SessionToken;
use crate::error::{Error, Result};
use crate::fetch::DataFetcher;
use crate::store::CredentialStore;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Infers the schema of an endpoint from its first record
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    fetcher: DataFetcher,
}

impl SchemaInferrer {
    /// Create an inferrer that samples through `fetcher`
    pub fn new(fetcher: DataFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch the collection at `endpoint` and infer from its first record
    pub async fn infer(&self, endpoint: &str, token: &SessionToken) -> Result<Schema> {
        let records = self.fetcher.fetch_records(endpoint, token).await?;
        let sample = records.first().ok_or_else(|| {
            Error::schema_inference(format!("Endpoint '{endpoint}' returned no records to sample"))
        })?;

        let schema = infer_from_record(sample)?;
        if schema.is_empty() {
            warn!("Sample record from {endpoint} has no string, number or boolean fields");
        }
        info!(
            "Inferred {} fields from {} ({} records fetched)",
            schema.len(),
            endpoint,
            records.len()
        );
        Ok(schema)
    }

    /// Infer the schema and persist it for later requests
    pub async fn infer_and_store(
        &self,
        endpoint: &str,
        token: &SessionToken,
        store: &CredentialStore,
    ) -> Result<Schema> {
        let schema = self.infer(endpoint, token).await?;
        store.set_schema(&schema).await?;
        Ok(schema)
    }
}

/// Build a schema from one sample record
///
/// Fields keep the record's key order. Values that are not strings, numbers
/// or booleans are dropped without error, as is any descriptor without a
/// usable name or label.
pub fn infer_from_record(record: &Value) -> Result<Schema> {
    let Value::Object(map) = record else {
        return Err(Error::schema_inference(format!(
            "Sample record must be an object, got {}",
            json_kind(record)
        )));
    };

    let mut seen = HashSet::new();
    let fields = map
        .iter()
        .filter_map(|(key, value)| {
            let kind = FieldKind::of(value);
            match kind.data_type() {
                Some(data_type) => Some(FieldDescriptor::dimension(key.as_str(), data_type)),
                None => {
                    debug!("Dropping field '{key}': unsupported {}", json_kind(value));
                    None
                }
            }
        })
        .filter(FieldDescriptor::is_valid)
        .inspect(|field| {
            if !seen.insert(field.name.clone()) {
                warn!(
                    "Label '{}' normalizes to duplicate field name '{}'",
                    field.label, field.name
                );
            }
        })
        .collect();

    Ok(Schema::from_fields(fields))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

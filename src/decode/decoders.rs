//! JSON decoder

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Path of the record list
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder expecting a bare top-level list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Create a decoder from an optional path
    pub fn from_path(path: Option<&str>) -> Self {
        Self {
            record_path: path.map(String::from),
        }
    }

    /// Get the record path
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        self.extract(value)
    }

    fn extract(&self, value: Value) -> Result<Vec<Value>> {
        let records = match &self.record_path {
            // Wildcards need a real JSONPath engine
            Some(path) if path.contains('*') => return extract_with_jsonpath(&value, path),
            Some(path) => extract_simple_path(value, path).ok_or_else(|| {
                Error::decode(format!("Response has no '{path}' member"))
            })?,
            None => value,
        };

        match records {
            Value::Array(arr) => Ok(arr),
            other => Err(Error::decode(format!(
                "Expected a list of records, got {}",
                match other {
                    Value::Null => "null",
                    Value::Object(_) => "an object",
                    _ => "a scalar",
                }
            ))),
        }
    }
}

/// Walk a simple dot path such as `data`, `$.result.items` or `pages[0].rows`
pub fn extract_simple_path(value: Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

            if !name.is_empty() {
                current = take_member(current, name)?;
            }

            let index: usize = index_str.parse().ok()?;
            current = match current {
                Value::Array(mut arr) if index < arr.len() => arr.swap_remove(index),
                _ => return None,
            };
        } else {
            current = take_member(current, part)?;
        }
    }

    Some(current)
}

fn take_member(value: Value, name: &str) -> Option<Value> {
    match value {
        Value::Object(mut map) => map.remove(name),
        _ => None,
    }
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

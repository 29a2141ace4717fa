//! Data fetch types

use crate::schema::FieldDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field requested by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequest {
    pub name: String,

    /// Source key to fall back to when `name` is absent from a record
    #[serde(skip)]
    pub label: Option<String>,
}

impl FieldRequest {
    /// Request a field by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }
}

impl From<&FieldDescriptor> for FieldRequest {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            label: (field.label != field.name).then(|| field.label.clone()),
        }
    }
}

/// One result row, positionally aligned with the requested fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a row
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

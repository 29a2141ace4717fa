//! Schema types

use crate::ident::{is_normalized, normalize_identifier};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column data type understood by the reporting front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    String,
    Number,
    Boolean,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "STRING"),
            DataType::Number => write!(f, "NUMBER"),
            DataType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

/// Result of decoding a sample value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// null, arrays and objects
    Unsupported,
}

impl FieldKind {
    /// Decode a value, trying string, number and boolean in that order
    pub fn of(value: &Value) -> Self {
        if value.is_string() {
            FieldKind::String
        } else if value.is_number() {
            FieldKind::Number
        } else if value.is_boolean() {
            FieldKind::Boolean
        } else {
            FieldKind::Unsupported
        }
    }

    /// Data type of a supported kind
    pub fn data_type(self) -> Option<DataType> {
        match self {
            FieldKind::String => Some(DataType::String),
            FieldKind::Number => Some(DataType::Number),
            FieldKind::Boolean => Some(DataType::Boolean),
            FieldKind::Unsupported => None,
        }
    }
}

/// Semantic role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConceptType {
    #[default]
    Dimension,
}

/// Column semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    pub concept_type: ConceptType,
}

/// One reportable column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Normalized identifier
    pub name: String,
    /// Original display name
    pub label: String,
    pub data_type: DataType,
    #[serde(default)]
    pub semantics: Semantics,
}

impl FieldDescriptor {
    /// Create a dimension whose name is the normalized `label`
    pub fn dimension(label: impl Into<String>, data_type: DataType) -> Self {
        let label = label.into();
        Self {
            name: normalize_identifier(&label),
            label,
            data_type,
            semantics: Semantics::default(),
        }
    }

    /// Name and label are present and the name is a normalized identifier
    pub fn is_valid(&self) -> bool {
        is_normalized(&self.name) && !self.label.is_empty()
    }
}

/// Ordered list of field descriptors, persisted as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema from descriptors, keeping their order
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// All descriptors in order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Iterate over descriptors
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Field names in order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

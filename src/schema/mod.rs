//! Schema module
//!
//! Derives the tabular schema from a sample API record and resolves
//! requested fields against it.
//!
//! # Features
//!
//! - **Type Decoding**: Classifies JSON values as STRING, NUMBER or BOOLEAN
//! - **Silent Filtering**: Drops fields of any other kind
//! - **Field Lookup**: Resolves requested field names, failing on a miss

mod inference;
mod lookup;
mod types;

pub use inference::{infer_from_record, SchemaInferrer};
pub use lookup::{find_field, resolve_fields};
pub use types::{ConceptType, DataType, FieldDescriptor, FieldKind, Schema, Semantics};

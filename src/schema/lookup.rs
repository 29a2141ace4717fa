//! Field lookup against a persisted schema

use super::types::{FieldDescriptor, Schema};
use crate::error::{Error, Result};
use crate::fetch::FieldRequest;

/// Find the descriptor whose name matches exactly
pub fn find_field<'a>(schema: &'a Schema, name: &str) -> Result<&'a FieldDescriptor> {
    schema
        .iter()
        .find(|field| field.name == name)
        .ok_or_else(|| Error::field_not_found(name))
}

/// Resolve every requested field, in request order
///
/// The first miss fails the whole request.
pub fn resolve_fields(schema: &Schema, requested: &[FieldRequest]) -> Result<Vec<FieldDescriptor>> {
    requested
        .iter()
        .map(|request| find_field(schema, &request.name).cloned())
        .collect()
}

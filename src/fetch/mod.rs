//! Data fetch module
//!
//! Retrieves the full record set of an endpoint in one bearer-authenticated
//! request and projects each record onto the requested field list.

mod fetcher;
mod types;

pub use fetcher::{project_record, DataFetcher};
pub use types::{FieldRequest, Row};

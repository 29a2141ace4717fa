//! Response decoder module
//!
//! Extracts the record list from a JSON response body, either from a
//! configured envelope path (`data` for the SGSST API) or from a bare
//! top-level array.

mod decoders;
mod types;

pub use decoders::{extract_simple_path, JsonDecoder};
pub use types::RecordDecoder;

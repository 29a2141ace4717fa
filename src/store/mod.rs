//! Credential store module
//!
//! Persists credentials, the session token and the inferred schema under
//! user-scoped keys.
//!
//! # Overview
//!
//! - `PropertyStore` - narrow key/value port (get/set/delete)
//! - `MemoryStore` - process-local implementation
//! - `FileStore` - JSON file per user with atomic writes
//! - `CredentialStore` - typed access to the connector's keys

mod backend;
mod credentials;

pub use backend::{FileStore, MemoryStore, PropertyStore};
pub use credentials::{keys, CredentialStore, StoredCredentials};

#[cfg(test)]
mod tests;

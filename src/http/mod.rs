//! HTTP client module
//!
//! Thin wrapper over `reqwest` for the remote API: base URL joining, default
//! headers, bearer authentication and JSON decoding. Every call is a single
//! round trip; there is no retry or rate limiting.

mod client;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};

//! Authentication module
//!
//! Exchanges company id, username and password for a session token through
//! the API's login call. The token is then sent as a bearer credential on
//! every data request.

mod authenticator;
mod types;

pub use authenticator::{extract_token, Authenticator};
pub use types::{Credentials, LoginRequest, SessionToken};

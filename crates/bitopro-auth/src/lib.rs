//! Credential handling and request signing for the BitoPro API
//!
//! Both the REST and WebSocket transports authenticate the same way: the
//! request body (or a default `{identity, nonce}` body) is serialized to
//! JSON, base64-encoded into a payload, and signed with HMAC-SHA384 under
//! the API secret. This crate owns that protocol.
//!
//! # Example
//!
//! ```no_run
//! use bitopro_auth::{Credentials, SystemClock, Clock};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let headers = creds.sign_identity(SystemClock.now_millis())?;
//!     println!("payload: {}", headers.payload);
//!     Ok(())
//! }
//! ```

mod clock;
mod credentials;
mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{
    AuthHeaders, Credentials, API_HEADER, API_KEY_HEADER, PAYLOAD_HEADER, SDK_IDENTIFIER,
    SIGNATURE_HEADER,
};
pub use error::{AuthError, AuthResult};

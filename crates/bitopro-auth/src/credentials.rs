//! API credentials and the BitoPro signing protocol
//!
//! BitoPro authenticates every private call with three headers derived
//! from the request body:
//!
//! 1. the body is serialized to JSON and base64-encoded into the payload,
//! 2. the payload (not the raw body) is signed with HMAC-SHA384 under the
//!    API secret, hex-encoded lowercase,
//! 3. the API key, payload and signature travel as `X-BITOPRO-*` headers.
//!
//! When an endpoint has no body of its own, a default
//! `{identity: email, nonce: now_millis}` body is signed instead. Header
//! sets are never reused across calls because the nonce must stay fresh.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which zeroizes the
//! memory on drop and keeps the secret out of `Debug` output.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha384;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Fixed identification header sent on every call, public or private
pub const API_HEADER: &str = "X-BITOPRO-API";
/// API key header on authenticated calls
pub const API_KEY_HEADER: &str = "X-BITOPRO-APIKEY";
/// Base64 JSON payload header on authenticated calls
pub const PAYLOAD_HEADER: &str = "X-BITOPRO-PAYLOAD";
/// Hex HMAC-SHA384 signature header on authenticated calls
pub const SIGNATURE_HEADER: &str = "X-BITOPRO-SIGNATURE";
/// Value of the identification header, kept identical to the reference SDK
pub const SDK_IDENTIFIER: &str = "hello bitopro";

/// Headers authenticating one request or connection attempt
///
/// Derived deterministically from the credentials and a body; recomputed
/// per call because the default body embeds a nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `X-BITOPRO-APIKEY` value
    pub api_key: String,
    /// `X-BITOPRO-PAYLOAD` value, base64 of the canonical JSON body
    pub payload: String,
    /// `X-BITOPRO-SIGNATURE` value, lowercase hex HMAC-SHA384 of the payload
    pub signature: String,
}

impl AuthHeaders {
    /// Header name/value pairs, in wire order
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (PAYLOAD_HEADER, self.payload.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

/// Default signing body for endpoints without a body of their own
#[derive(Serialize)]
struct IdentityBody<'a> {
    identity: &'a str,
    nonce: u64,
}

/// A complete credential set for private endpoints
///
/// Construction fails if any field is empty; a client without credentials
/// simply holds no `Credentials` value and stays in unauthenticated mode.
/// Immutable for the lifetime of a client.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    email: String,
}

impl Credentials {
    /// Create a credential set, rejecting empty fields
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        email: impl Into<String>,
    ) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        let email = email.into();

        if api_key.is_empty() {
            return Err(AuthError::MissingField("apiKey"));
        }
        if api_secret.is_empty() {
            return Err(AuthError::MissingField("apiSecret"));
        }
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            email,
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITOPRO_API_KEY`, `BITOPRO_API_SECRET` and `BITOPRO_EMAIL`.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("BITOPRO_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("BITOPRO_API_KEY".to_string()))?;
        let api_secret = std::env::var("BITOPRO_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("BITOPRO_API_SECRET".to_string()))?;
        let email = std::env::var("BITOPRO_EMAIL")
            .map_err(|_| AuthError::EnvVarNotSet("BITOPRO_EMAIL".to_string()))?;

        let credentials = Self::new(api_key, api_secret, email)?;
        debug!("Loaded API credentials from environment");
        Ok(credentials)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the account email used as the signing identity
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Sign a request body
    ///
    /// The signature is computed over the base64 payload, so the JSON
    /// serialization must be deterministic for the exchange to validate it.
    /// serde serializes struct fields in declaration order, which keeps the
    /// payload byte-stable for a fixed body.
    pub fn sign<B: Serialize>(&self, body: &B) -> AuthResult<AuthHeaders> {
        let json = serde_json::to_vec(body)?;
        let payload = BASE64.encode(json);
        let signature = self.sign_payload(&payload);

        Ok(AuthHeaders {
            api_key: self.api_key.clone(),
            payload,
            signature,
        })
    }

    /// Sign the default `{identity, nonce}` body
    ///
    /// Used by authenticated GET/DELETE calls and private WebSocket
    /// channels. The nonce must be fresh per call or connection attempt;
    /// pass `clock.now_millis()` from an injected [`crate::Clock`].
    pub fn sign_identity(&self, nonce_millis: u64) -> AuthResult<AuthHeaders> {
        self.sign(&IdentityBody {
            identity: &self.email,
            nonce: nonce_millis,
        })
    }

    /// HMAC-SHA384 over the encoded payload, lowercase hex
    fn sign_payload(&self, payload: &str) -> String {
        let mut mac = HmacSha384::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new secret box with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("api_secret", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            Credentials::new("", "s", "e"),
            Err(AuthError::MissingField("apiKey"))
        ));
        assert!(matches!(
            Credentials::new("k", "", "e"),
            Err(AuthError::MissingField("apiSecret"))
        ));
        assert!(matches!(
            Credentials::new("k", "s", ""),
            Err(AuthError::MissingField("email"))
        ));
    }

    #[test]
    fn test_known_vector() {
        // body {"identity":"e","nonce":1000} signed under secret "s"
        let creds = Credentials::new("k", "s", "e").unwrap();
        let headers = creds.sign_identity(1000).unwrap();

        assert_eq!(headers.api_key, "k");
        assert_eq!(headers.payload, "eyJpZGVudGl0eSI6ImUiLCJub25jZSI6MTAwMH0=");
        assert_eq!(
            headers.signature,
            "d03f44deffae586d054da656772e3eba5a2169a16828ea65c4033cc9554f1e4f8722d1df53dfb374fc526f417f0978c9"
        );
    }

    #[test]
    fn test_signing_is_deterministic_for_fixed_nonce() {
        let creds = Credentials::new("key", "secret", "trader@example.com").unwrap();
        let a = creds.sign_identity(1_650_000_000_000).unwrap();
        let b = creds.sign_identity(1_650_000_000_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nonce_changes_signature_not_api_key() {
        let creds = Credentials::new("key", "secret", "trader@example.com").unwrap();
        let a = creds.sign_identity(1000).unwrap();
        let b = creds.sign_identity(1001).unwrap();
        assert_eq!(a.api_key, b.api_key);
        assert_ne!(a.payload, b.payload);
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_payload_round_trips_to_signed_body() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Body {
            identity: String,
            nonce: u64,
        }

        let creds = Credentials::new("k", "s", "e").unwrap();
        let body = Body {
            identity: "e".to_string(),
            nonce: 1000,
        };
        let headers = creds.sign(&body).unwrap();

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&headers.payload)
            .unwrap();
        let round_tripped: Body = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(round_tripped, body);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let creds = Credentials::new("k", "s", "e").unwrap();
        let headers = creds.sign_identity(42).unwrap();
        // SHA-384 digest is 48 bytes, 96 hex chars
        assert_eq!(headers.signature.len(), 96);
        assert!(headers
            .signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key", "very-secret", "a@b.c").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_header_pairs_order() {
        let creds = Credentials::new("k", "s", "e").unwrap();
        let headers = creds.sign_identity(1000).unwrap();
        let pairs = headers.pairs();
        assert_eq!(pairs[0].0, API_KEY_HEADER);
        assert_eq!(pairs[1].0, PAYLOAD_HEADER);
        assert_eq!(pairs[2].0, SIGNATURE_HEADER);
    }
}

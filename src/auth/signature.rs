//! HMAC-SHA512 signature generation for Indodax API authentication.
//!
//! Indodax private endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA512(secret, POST_body))
//! ```
//!
//! where `POST_body` is the exact URL-encoded form body sent with the request,
//! including the `method` and `nonce` parameters. The signature travels in the
//! `Sign` header and the API key in the `Key` header.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::Credentials;
use crate::error::IndodaxError;
use crate::types::RequestParams;

type HmacSha512 = Hmac<Sha512>;

/// A signed request body ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Lowercase hex HMAC-SHA512 of `body`
    pub signature: String,
    /// URL-encoded form body
    pub body: String,
}

/// Sign a request for Indodax's private API.
///
/// Appends `method` and `nonce` to `params`, encodes the result in insertion
/// order and signs exactly those bytes.
///
/// # Example
///
/// ```rust
/// use indodax_api_client::auth::{Credentials, sign_request};
/// use indodax_api_client::types::RequestParams;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let params = RequestParams::new().with("pair", "btc_idr");
/// let signed = sign_request(&credentials, "tradeHistory", 1234567890, params)?;
/// assert_eq!(signed.body, "pair=btc_idr&method=tradeHistory&nonce=1234567890");
/// assert_eq!(signed.signature.len(), 128);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    method: &str,
    nonce: u64,
    params: RequestParams,
) -> Result<SignedRequest, IndodaxError> {
    let body = params
        .with("method", method)
        .with("nonce", nonce)
        .to_form()?;
    let signature = sign_payload(credentials.expose_secret(), &body)?;
    Ok(SignedRequest { signature, body })
}

/// Compute the lowercase hex HMAC-SHA512 of `payload` keyed by `secret`.
pub fn sign_payload(secret: &[u8], payload: &str) -> Result<String, IndodaxError> {
    let mut hmac = HmacSha512::new_from_slice(secret)
        .map_err(|e| IndodaxError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(payload.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

//! Authentication module for the Indodax private API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA512 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_VAR, Credentials, CredentialsProvider, DotenvCredentials, EnvCredentials,
    SECRET_KEY_VAR, StaticCredentials,
};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{SignedRequest, sign_payload, sign_request};

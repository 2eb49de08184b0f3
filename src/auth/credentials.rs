//! Credential management for Indodax API authentication.

use std::path::Path;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretBox};

use crate::error::IndodaxError;

/// Environment/`.env` key holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment/`.env` key holding the API secret.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// API credentials containing the key and secret.
///
/// The secret is a byte sequence used as the HMAC key; it is never printed.
pub struct Credentials {
    /// The API key (public identifier, sent in the `Key` header)
    pub api_key: String,
    api_secret: SecretBox<[u8]>,
}

impl Credentials {
    /// Create new credentials from an API key and secret bytes.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretBox::new(api_secret.into().into_boxed_slice()),
        }
    }

    /// Create credentials, rejecting an empty key or secret.
    pub fn try_new(
        api_key: impl Into<String>,
        api_secret: impl Into<Vec<u8>>,
    ) -> Result<Self, IndodaxError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.trim().is_empty() || api_secret.is_empty() {
            return Err(IndodaxError::MissingCredentials);
        }
        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &[u8] {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Arc<P> {
    fn get_credentials(&self) -> &Credentials {
        (**self).get_credentials()
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `API_KEY` and `SECRET_KEY`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, IndodaxError> {
        Self::from_env_vars(API_KEY_VAR, SECRET_KEY_VAR)
    }

    /// Create credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, IndodaxError> {
        let api_key = std::env::var(key_var)
            .map_err(|_| IndodaxError::Config(format!("environment variable {key_var} not set")))?;
        let api_secret = std::env::var(secret_var).map_err(|_| {
            IndodaxError::Config(format!("environment variable {secret_var} not set"))
        })?;

        Ok(Self {
            credentials: Credentials::try_new(api_key, api_secret)?,
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the variables are not set or empty.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider backed by a `.env`-style key file (`KEY=VALUE` lines).
///
/// The file is parsed without touching the process environment.
#[derive(Debug)]
pub struct DotenvCredentials {
    credentials: Credentials,
}

impl DotenvCredentials {
    /// Load `API_KEY` and `SECRET_KEY` from `.env` in the working directory.
    pub fn from_default_file() -> Result<Self, IndodaxError> {
        Self::from_path(".env")
    }

    /// Load `API_KEY` and `SECRET_KEY` from the given file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IndodaxError> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| IndodaxError::Config(format!("cannot read {}: {e}", path.display())))?;

        let mut api_key = None;
        let mut api_secret = None;
        for entry in entries {
            let (name, value) = entry
                .map_err(|e| IndodaxError::Config(format!("cannot parse {}: {e}", path.display())))?;
            match name.as_str() {
                API_KEY_VAR => api_key = Some(value),
                SECRET_KEY_VAR => api_secret = Some(value),
                _ => {}
            }
        }

        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Ok(Self {
                credentials: Credentials::try_new(key, secret)?,
            }),
            _ => Err(IndodaxError::MissingCredentials),
        }
    }
}

impl CredentialsProvider for DotenvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("key", b"secret".to_vec());
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), b"secret");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = Credentials::try_new("key", "").unwrap_err();
        assert!(matches!(err, IndodaxError::MissingCredentials));
    }

    #[test]
    fn test_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# indodax keys").unwrap();
        writeln!(file, "API_KEY=ABCD-EFGH").unwrap();
        writeln!(file, "SECRET_KEY=s3cr3t").unwrap();
        writeln!(file, "OTHER=ignored").unwrap();

        let provider = DotenvCredentials::from_path(file.path()).unwrap();
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "ABCD-EFGH");
        assert_eq!(creds.expose_secret(), b"s3cr3t");
    }

    #[test]
    fn test_dotenv_missing_secret() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "API_KEY=ABCD-EFGH").unwrap();

        let err = DotenvCredentials::from_path(file.path()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_dotenv_missing_file() {
        let err = DotenvCredentials::from_path("/nonexistent/indodax/.env").unwrap_err();
        assert!(matches!(err, IndodaxError::Config(_)));
    }
}

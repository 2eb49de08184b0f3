//! Error types for the Indodax client library.

use thiserror::Error;

/// The main error type for all Indodax client operations.
#[derive(Error, Debug)]
pub enum IndodaxError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The exchange answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code returned by the server
        status: u16,
        /// Raw response body, useful for diagnosing the failure
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An authenticated call failed; carries the exchange method name
    #[error("{operation} failed: {source}")]
    Request {
        /// Exchange method name, e.g. `getInfo`
        operation: String,
        /// Underlying transport or parse failure
        #[source]
        source: Box<IndodaxError>,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,

    /// Invalid configuration (unreadable key file, empty value, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response JSON does not have the expected structure
    #[error("Unexpected response structure: {0}")]
    Schema(String),

    /// A field could not be converted to its semantic type
    #[error("Invalid value {value:?} for field `{field}`: {reason}")]
    Coercion {
        /// Field name in the trade record
        field: String,
        /// Offending value as found in the response
        value: String,
        /// Why the conversion failed
        reason: String,
    },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,
}

impl IndodaxError {
    /// Wrap an error with the name of the exchange method that produced it.
    pub(crate) fn request(operation: impl Into<String>, source: IndodaxError) -> Self {
        Self::Request {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn coercion(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Coercion {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a connection-level transport failure.
    ///
    /// Only these failures are retried, and only on the public price path.
    pub fn is_connect(&self) -> bool {
        match self {
            IndodaxError::Http(e) => e.is_connect(),
            IndodaxError::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.is_connect(),
            IndodaxError::Request { source, .. } => source.is_connect(),
            _ => false,
        }
    }

    /// Check if this is a configuration error raised before any network call.
    pub fn is_config(&self) -> bool {
        matches!(self, IndodaxError::MissingCredentials | IndodaxError::Config(_))
    }
}

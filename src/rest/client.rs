//! Indodax private REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::debug;
use url::Url;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, sign_request};
use crate::error::IndodaxError;
use crate::rest::endpoints::{INDODAX_BASE_URL, PRIVATE_PATH};
use crate::rest::public::PublicClient;
use crate::rest::traits::IndodaxApi;
use crate::types::RequestParams;

/// The Indodax private REST API client.
///
/// Holds one key/secret pair and signs every call with a fresh nonce.
/// Responses are returned as pretty-printed JSON strings; callers parse
/// further if they need typed data.
///
/// Authenticated calls are never retried: a blind retry of `trade`,
/// `cancelOrder` or `withdrawCoin` could submit the operation twice.
///
/// # Example
///
/// ```rust,no_run
/// use indodax_api_client::auth::DotenvCredentials;
/// use indodax_api_client::rest::{IndodaxApi, IndodaxRestClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(DotenvCredentials::from_default_file()?);
///     let client = IndodaxRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let info = client.get_info().await?;
///     println!("{info}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct IndodaxRestClient {
    http_client: ClientWithMiddleware,
    private_url: Url,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    public: PublicClient,
}

impl IndodaxRestClient {
    /// Create a client with default settings for the given credentials.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Result<Self, IndodaxError> {
        Self::builder().credentials(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder() -> IndodaxRestClientBuilder {
        IndodaxRestClientBuilder::new()
    }

    /// Sign and send one private API call.
    ///
    /// `method` and `nonce` are appended to `params`; the signed form body is
    /// POSTed with the `Sign` and `Key` headers. The JSON response is returned
    /// re-serialized with 4-space indentation, keys in their original order.
    /// Failures are wrapped in [`IndodaxError::Request`] naming `method`.
    pub async fn authenticated_call(
        &self,
        method: &str,
        params: RequestParams,
    ) -> Result<String, IndodaxError> {
        self.private_post(method, params)
            .await
            .map_err(|e| IndodaxError::request(method, e))
    }

    async fn private_post(
        &self,
        method: &str,
        params: RequestParams,
    ) -> Result<String, IndodaxError> {
        let creds = self.credentials.get_credentials();
        let nonce = self.nonce_provider.next_nonce();
        let signed = sign_request(creds, method, nonce, params)?;

        debug!(method, nonce, "sending private request");

        let response = self
            .http_client
            .post(self.private_url.clone())
            .header("Key", &creds.api_key)
            .header("Sign", signed.signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(signed.body)
            .send()
            .await?;

        let value = read_json(response).await?;
        pretty_json(&value)
    }

    /// Get the ticker for `coin` quoted in rupiah.
    ///
    /// Uses the public price fetcher with its default timeout and retry policy.
    pub async fn get_price(&self, coin: &str) -> Result<Value, IndodaxError> {
        self.public.price(coin).await
    }

    /// The public client sharing this client's base URL.
    pub fn public(&self) -> &PublicClient {
        &self.public
    }
}

impl std::fmt::Debug for IndodaxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndodaxRestClient")
            .field("private_url", &self.private_url.as_str())
            .field("api_key", &self.credentials.get_credentials().api_key)
            .finish()
    }
}

impl IndodaxApi for IndodaxRestClient {
    async fn authenticated_call(
        &self,
        method: &str,
        params: RequestParams,
    ) -> Result<String, IndodaxError> {
        IndodaxRestClient::authenticated_call(self, method, params).await
    }
}

/// Builder for [`IndodaxRestClient`].
pub struct IndodaxRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl IndodaxRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: INDODAX_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Each API key needs exactly one provider; do not share one across keys.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a total timeout for each private request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Fails with [`IndodaxError::MissingCredentials`] when no credentials
    /// were configured, so misconfiguration surfaces before any network call.
    pub fn build(self) -> Result<IndodaxRestClient, IndodaxError> {
        let credentials = self.credentials.ok_or(IndodaxError::MissingCredentials)?;
        let base_url = Url::parse(&self.base_url)?;
        let private_url = base_url.join(PRIVATE_PATH)?;

        let user_agent = self.user_agent.unwrap_or_else(default_user_agent);
        let http_client = build_http_client(&user_agent, self.timeout)?;

        let public = PublicClient::builder()
            .base_url(self.base_url)
            .user_agent(user_agent)
            .build()?;

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(IndodaxRestClient {
            http_client,
            private_url,
            credentials,
            nonce_provider,
            public,
        })
    }
}

impl Default for IndodaxRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("indodax-api-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Build an HTTP client with tracing middleware and no retry layer.
pub(crate) fn build_http_client(
    user_agent: &str,
    timeout: Option<Duration>,
) -> Result<ClientWithMiddleware, IndodaxError> {
    let mut headers = HeaderMap::new();
    let header_value = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("indodax-api-client"));
    headers.insert(USER_AGENT, header_value);

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(ClientBuilder::new(builder.build()?)
        .with(TracingMiddleware::default())
        .build())
}

/// Read a response body as JSON, rejecting non-2xx statuses.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, IndodaxError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(IndodaxError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Serialize JSON with 4-space indentation, keeping key order.
pub fn pretty_json(value: &Value) -> Result<String, IndodaxError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| IndodaxError::Schema(format!("non UTF-8 JSON output: {e}")))
}

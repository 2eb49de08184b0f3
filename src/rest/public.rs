//! Public REST API endpoints (no authentication required).

use std::future::Future;
use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use url::Url;

use crate::error::IndodaxError;
use crate::rest::client::{build_http_client, default_user_agent, read_json};
use crate::rest::endpoints::{INDODAX_BASE_URL, TICKER_PATH};
use crate::types::DEFAULT_QUOTE;

/// Default per-request timeout for ticker lookups.
pub const DEFAULT_PRICE_TIMEOUT: Duration = Duration::from_secs(30);

/// How connection failures on the public price path are retried.
///
/// Only connection-level failures are retried; timeouts, HTTP error statuses
/// and malformed JSON are returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 mean 1.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            delay: Duration::from_secs(5),
        }
    }
}

/// Run `op`, retrying connection failures according to `policy`.
///
/// Cancelling `cancel` interrupts both the running attempt and the pause
/// between attempts and yields [`IndodaxError::Cancelled`]. When attempts
/// run out, the last connection error is returned.
pub async fn retry_on_connect<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<T, IndodaxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IndodaxError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(IndodaxError::Cancelled),
            outcome = op() => outcome,
        };

        match outcome {
            Err(e) if e.is_connect() && attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "connection failed, retrying"
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(IndodaxError::Cancelled),
                    _ = tokio::time::sleep(policy.delay) => {}
                }
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Client for the unauthenticated ticker endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use indodax_api_client::rest::PublicClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new()?;
///     let ticker = client.price("btc").await?;
///     println!("last: {}", ticker["ticker"]["last"]);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PublicClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    retry: RetryPolicy,
    timeout: Duration,
}

impl PublicClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self, IndodaxError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> PublicClientBuilder {
        PublicClientBuilder::new()
    }

    /// Get the ticker for `coin` quoted in rupiah.
    ///
    /// Uses the configured timeout and retry policy and cannot be cancelled.
    pub async fn price(&self, coin: &str) -> Result<Value, IndodaxError> {
        self.price_with(coin, self.timeout, &CancellationToken::new())
            .await
    }

    /// Get the ticker for `coin` with an explicit timeout and cancellation token.
    pub async fn price_with(
        &self,
        coin: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Value, IndodaxError> {
        let url = self.ticker_url(coin)?;
        retry_on_connect(&self.retry, cancel, || self.fetch(url.clone(), timeout)).await
    }

    /// URL of the rupiah ticker for `coin`, e.g. `/api/ticker/btcidr`.
    pub fn ticker_url(&self, coin: &str) -> Result<Url, IndodaxError> {
        Ok(self
            .base_url
            .join(&format!("{TICKER_PATH}{coin}{DEFAULT_QUOTE}"))?)
    }

    async fn fetch(&self, url: Url, timeout: Duration) -> Result<Value, IndodaxError> {
        let response = self.http_client.get(url).timeout(timeout).send().await?;
        read_json(response).await
    }
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`PublicClient`].
pub struct PublicClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl PublicClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: INDODAX_BASE_URL.to_string(),
            user_agent: None,
            retry: RetryPolicy::default(),
            timeout: DEFAULT_PRICE_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the retry policy for connection failures.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the default per-request timeout used by [`PublicClient::price`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PublicClient, IndodaxError> {
        let user_agent = self.user_agent.unwrap_or_else(default_user_agent);
        Ok(PublicClient {
            http_client: build_http_client(&user_agent, None)?,
            base_url: Url::parse(&self.base_url)?,
            retry: self.retry,
            timeout: self.timeout,
        })
    }
}

impl Default for PublicClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

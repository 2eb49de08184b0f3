//! Indodax REST API clients.
//!
//! - [`IndodaxRestClient`] signs and sends private (trade API) calls.
//! - [`IndodaxApi`] exposes the trading operations on top of a single
//!   `authenticated_call` primitive.
//! - [`PublicClient`] fetches ticker prices without authentication.

mod client;
mod endpoints;
mod public;
mod requests;
mod traits;

pub use client::{IndodaxRestClient, IndodaxRestClientBuilder, pretty_json};
pub use endpoints::*;
pub use public::{
    DEFAULT_PRICE_TIMEOUT, PublicClient, PublicClientBuilder, RetryPolicy, retry_on_connect,
};
pub use requests::WithdrawRequest;
pub use traits::IndodaxApi;

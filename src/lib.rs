//! # Indodax Client
//!
//! An async Rust client library for the Indodax exchange REST API.
//!
//! ## Features
//!
//! - Signed private (trade API) calls: balances, orders, cancellations,
//!   withdrawals and trade history
//! - HMAC-SHA512 request signing with strictly increasing nonces
//! - Public ticker lookups with bounded, cancellable retry on connection failures
//! - Trade-history CSV reports with Jakarta-local timestamps
//! - Decimal precision with `rust_decimal`; prices and amounts are never
//!   round-tripped through floating point
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use indodax_api_client::auth::DotenvCredentials;
//! use indodax_api_client::rest::{IndodaxApi, IndodaxRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(DotenvCredentials::from_default_file()?);
//!     let client = IndodaxRestClient::new(credentials)?;
//!
//!     let history = client.trade_history("btc").await?;
//!     let path = indodax_api_client::report::json_to_csv_str(&history, "reports")?;
//!     println!("Report written to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod report;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::IndodaxError;
pub use rest::{IndodaxApi, IndodaxRestClient, PublicClient};
pub use types::{Pair, Side};

/// Result type alias using IndodaxError
pub type Result<T> = std::result::Result<T, IndodaxError>;

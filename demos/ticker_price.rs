//! Example: Public ticker with bounded retry and Ctrl-C cancellation.
//!
//! Run with: cargo run --example ticker_price -- eth

use std::time::Duration;

use indodax_api_client::rest::{PublicClient, RetryPolicy};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let coin = std::env::args().nth(1).unwrap_or_else(|| "btc".to_string());

    let client = PublicClient::builder()
        .retry_policy(RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_secs(5),
        })
        .build()?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let ticker = client
        .price_with(&coin, Duration::from_secs(30), &cancel)
        .await?;
    println!("{coin}/idr last: {}", ticker["ticker"]["last"]);

    Ok(())
}

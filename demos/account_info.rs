//! Example: Account balance and open orders.
//!
//! Reads `API_KEY` and `SECRET_KEY` from `.env`.
//!
//! Run with: cargo run --example account_info

use std::sync::Arc;

use indodax_api_client::auth::DotenvCredentials;
use indodax_api_client::rest::{IndodaxApi, IndodaxRestClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = match DotenvCredentials::from_default_file() {
        Ok(creds) => Arc::new(creds),
        Err(e) => {
            println!("Create a .env file with API_KEY and SECRET_KEY to run this example ({e}).");
            return Ok(());
        }
    };

    let client = IndodaxRestClient::new(credentials)?;

    println!("{}", client.get_info().await?);
    println!("{}", client.open_order("btc").await?);

    Ok(())
}

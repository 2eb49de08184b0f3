//! Example: Export trade history for a coin to CSV.
//!
//! Run with: cargo run --example trade_report -- btc reports

use std::sync::Arc;

use indodax_api_client::auth::DotenvCredentials;
use indodax_api_client::report::TradeHistoryReport;
use indodax_api_client::rest::{IndodaxApi, IndodaxRestClient};
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let coin = args.next().unwrap_or_else(|| "btc".to_string());
    let output = args.next().unwrap_or_else(|| "reports".to_string());

    let credentials = match DotenvCredentials::from_default_file() {
        Ok(creds) => Arc::new(creds),
        Err(e) => {
            println!("Create a .env file with API_KEY and SECRET_KEY to run this example ({e}).");
            return Ok(());
        }
    };
    let client = IndodaxRestClient::new(credentials)?;

    let history = client.trade_history(coin.as_str()).await?;
    let report = TradeHistoryReport::from_json_str(&history)?;
    for row in report.rows().iter().take(5) {
        println!("{} {} {} @ {}", row.time, row.kind, row.volume, row.price);
    }

    let path = report.write_to(&output, OffsetDateTime::now_utc())?;
    println!("Report written to {}", path.display());

    Ok(())
}

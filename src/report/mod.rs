//! Trade-history CSV reports.
//!
//! Turns a `tradeHistory` response into a flat CSV with Indonesian headers
//! and Jakarta-local timestamps:
//!
//! ```text
//! WAKTU,TIPE,HARGA,IDR,BTC,FEE
//! 2023-11-15 05:13:20,beli,900000000,450000000,0.5,0.0025
//! ```
//!
//! The whole report is built in memory before anything touches the disk, so a
//! bad record never leaves a partial file behind.

mod trade;

pub use trade::{GENERIC_VOLUME_FIELD, TradeRecord};

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde_json::Value;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use crate::error::IndodaxError;
use crate::types::Pair;

/// Asia/Jakarta (WIB), which has no daylight saving.
pub const JAKARTA: UtcOffset = offset!(+7);

/// Label for purchases; every other trade type is reported as a sale.
pub const BUY_LABEL: &str = "beli";
/// Label for sales.
pub const SELL_LABEL: &str = "jual";

/// One CSV line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// `WAKTU`: trade time in Jakarta, `YYYY-MM-DD HH:MM:SS`
    pub time: String,
    /// `TIPE`: `beli` or `jual`
    pub kind: &'static str,
    /// `HARGA`
    pub price: Decimal,
    /// `IDR`: `floor(volume * round(price, 9))`
    pub idr: Decimal,
    /// Traded amount, headed by the base currency symbol
    pub volume: Decimal,
    /// `FEE`
    pub fee: Decimal,
}

impl ReportRow {
    /// Derive the report line for a trade.
    pub fn from_record(record: &TradeRecord) -> Result<Self, IndodaxError> {
        Ok(Self {
            time: jakarta_time(record.trade_time)?,
            kind: if record.is_buy() { BUY_LABEL } else { SELL_LABEL },
            price: record.price,
            idr: record.idr_value()?,
            volume: record.volume,
            fee: record.fee,
        })
    }

    /// Decimals are written normalized: `900000000`, not `900000000.0`; `0.0025`, not `0.00250000`.
    fn to_record(&self) -> [String; 6] {
        [
            self.time.clone(),
            self.kind.to_string(),
            self.price.normalize().to_string(),
            self.idr.normalize().to_string(),
            self.volume.normalize().to_string(),
            self.fee.normalize().to_string(),
        ]
    }
}

/// A trade-history report ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeHistoryReport {
    pair: Pair,
    volume_symbol: String,
    rows: Vec<ReportRow>,
}

impl TradeHistoryReport {
    /// Build a report from a `tradeHistory` response (`{"return": {"trades": [...]}}`).
    ///
    /// Fails when the nesting is absent, the trade list is empty, or any
    /// record cannot be coerced. Rows keep the response order.
    pub fn from_response(response: &Value) -> Result<Self, IndodaxError> {
        let trades = response
            .get("return")
            .and_then(|r| r.get("trades"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                IndodaxError::Schema("expected `return.trades` array in trade history".to_string())
            })?;

        let records = trades
            .iter()
            .map(TradeRecord::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        let first = records.first().ok_or_else(|| {
            IndodaxError::Schema("trade history contains no trades".to_string())
        })?;
        let pair = first.pair.clone();
        let volume_symbol = first.volume_symbol.clone();

        if let Some(other) = records.iter().find(|r| r.volume_symbol != volume_symbol) {
            return Err(IndodaxError::Schema(format!(
                "trade history mixes {} and {} trades",
                pair, other.pair
            )));
        }

        let rows = records
            .iter()
            .map(ReportRow::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pair,
            volume_symbol,
            rows,
        })
    }

    /// Build a report from a JSON string, e.g. the output of `trade_history`.
    pub fn from_json_str(response: &str) -> Result<Self, IndodaxError> {
        let value: Value = serde_json::from_str(response)?;
        Self::from_response(&value)
    }

    /// Pair of the first trade.
    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Column headers: `WAKTU, TIPE, HARGA, IDR, <SYMBOL>, FEE`.
    pub fn headers(&self) -> [String; 6] {
        [
            "WAKTU".to_string(),
            "TIPE".to_string(),
            "HARGA".to_string(),
            "IDR".to_string(),
            self.volume_symbol.to_uppercase(),
            "FEE".to_string(),
        ]
    }

    /// `trade-history-indodax-{pair}-{date}-{unix}.csv` for the given instant,
    /// with the date taken in Jakarta.
    pub fn file_name(&self, now: OffsetDateTime) -> Result<String, IndodaxError> {
        let date_format = format_description!("[year]-[month]-[day]");
        let date = now
            .to_offset(JAKARTA)
            .format(&date_format)
            .map_err(|e| IndodaxError::coercion("date", now.to_string(), e))?;
        Ok(format!(
            "trade-history-indodax-{}-{}-{}.csv",
            self.pair.compact(),
            date,
            now.unix_timestamp()
        ))
    }

    /// Encode the report as UTF-8 CSV with a header row.
    pub fn to_csv(&self) -> Result<Vec<u8>, IndodaxError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.headers())?;
        for row in &self.rows {
            writer.write_record(row.to_record())?;
        }
        writer.into_inner().map_err(|e| IndodaxError::Io(e.into_error()))
    }

    /// Write the report into `output_folder` (created if needed) and return
    /// the absolute path of the new file.
    pub fn write_to(
        &self,
        output_folder: impl AsRef<Path>,
        now: OffsetDateTime,
    ) -> Result<PathBuf, IndodaxError> {
        let contents = self.to_csv()?;

        let folder = std::path::absolute(output_folder.as_ref())?;
        std::fs::create_dir_all(&folder)?;
        let path = folder.join(self.file_name(now)?);
        std::fs::write(&path, contents)?;

        info!(path = %path.display(), rows = self.rows.len(), "trade history report written");
        Ok(path)
    }
}

/// Convert a `tradeHistory` response into a CSV file in `output_folder`.
///
/// Returns the absolute path of the written file.
pub fn json_to_csv(
    trade_history: &Value,
    output_folder: impl AsRef<Path>,
) -> Result<PathBuf, IndodaxError> {
    TradeHistoryReport::from_response(trade_history)?
        .write_to(output_folder, OffsetDateTime::now_utc())
}

/// Same as [`json_to_csv`], taking the JSON text returned by the client.
pub fn json_to_csv_str(
    trade_history: &str,
    output_folder: impl AsRef<Path>,
) -> Result<PathBuf, IndodaxError> {
    TradeHistoryReport::from_json_str(trade_history)?
        .write_to(output_folder, OffsetDateTime::now_utc())
}

/// Render unix seconds as Jakarta local time.
pub fn jakarta_time(unix_seconds: i64) -> Result<String, IndodaxError> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(unix_seconds)
        .map_err(|e| IndodaxError::coercion("trade_time", unix_seconds.to_string(), e))?
        .to_offset(JAKARTA)
        .format(&format)
        .map_err(|e| IndodaxError::coercion("trade_time", unix_seconds.to_string(), e))
}

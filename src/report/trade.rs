//! Trade records as returned by `tradeHistory`, coerced to typed values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::IndodaxError;
use crate::types::Pair;

/// Field accepted for the traded amount when the base-currency field is absent.
pub const GENERIC_VOLUME_FIELD: &str = "volume";

/// One executed trade.
///
/// The traded amount is keyed by the pair's base currency on the wire
/// (`"btc": "0.5"` for `btc_idr`); [`TradeRecord::volume_symbol`] keeps that
/// name for the report header.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub pair: Pair,
    pub trade_id: u64,
    pub order_id: u64,
    /// Raw trade type, normally `buy` or `sell`.
    pub trade_type: String,
    pub price: Decimal,
    pub volume: Decimal,
    pub volume_symbol: String,
    pub fee: Decimal,
    /// Unix seconds, UTC.
    pub trade_time: i64,
    pub client_order_id: String,
}

impl TradeRecord {
    /// Coerce a JSON trade object into a record.
    ///
    /// Missing required fields are schema errors; values that do not parse as
    /// their semantic type are coercion errors.
    pub fn from_json(value: &Value) -> Result<Self, IndodaxError> {
        let record = value
            .as_object()
            .ok_or_else(|| IndodaxError::Schema("trade entry is not an object".to_string()))?;

        let pair = Pair::parse(&text(required(record, "pair")?))?;
        let volume_symbol = pair.base().to_string();
        let volume = match record.get(volume_symbol.as_str()) {
            Some(value) => decimal(&volume_symbol, value)?,
            None => decimal(
                GENERIC_VOLUME_FIELD,
                required(record, GENERIC_VOLUME_FIELD).map_err(|_| {
                    IndodaxError::Schema(format!(
                        "trade record for {pair} has no `{volume_symbol}` amount"
                    ))
                })?,
            )?,
        };

        Ok(Self {
            trade_id: unsigned("trade_id", required(record, "trade_id")?)?,
            order_id: unsigned("order_id", required(record, "order_id")?)?,
            trade_type: text(required(record, "type")?),
            price: decimal("price", required(record, "price")?)?,
            volume,
            volume_symbol,
            fee: decimal("fee", required(record, "fee")?)?,
            trade_time: integer("trade_time", required(record, "trade_time")?)?,
            client_order_id: text(required(record, "client_order_id")?),
            pair,
        })
    }

    /// Whether this trade was a purchase.
    pub fn is_buy(&self) -> bool {
        self.trade_type == "buy"
    }

    /// Rupiah value of the trade: `floor(volume * round(price, 9))`.
    pub fn idr_value(&self) -> Result<Decimal, IndodaxError> {
        self.volume
            .checked_mul(self.price.round_dp(9))
            .map(|value| value.floor())
            .ok_or_else(|| {
                IndodaxError::coercion(
                    "IDR",
                    format!("{} * {}", self.volume, self.price),
                    "value out of range",
                )
            })
    }
}

fn required<'a>(record: &'a Map<String, Value>, name: &str) -> Result<&'a Value, IndodaxError> {
    record
        .get(name)
        .ok_or_else(|| IndodaxError::Schema(format!("trade record missing `{name}`")))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric_text(name: &str, value: &Value) -> Result<String, IndodaxError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(IndodaxError::coercion(name, other.to_string(), "expected a number")),
    }
}

fn decimal(name: &str, value: &Value) -> Result<Decimal, IndodaxError> {
    let raw = numeric_text(name, value)?;
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|e| IndodaxError::coercion(name, raw, e))
}

fn integer(name: &str, value: &Value) -> Result<i64, IndodaxError> {
    let raw = numeric_text(name, value)?;
    raw.parse::<i64>()
        .map_err(|e| IndodaxError::coercion(name, raw, e))
}

fn unsigned(name: &str, value: &Value) -> Result<u64, IndodaxError> {
    let raw = numeric_text(name, value)?;
    raw.parse::<u64>()
        .map_err(|e| IndodaxError::coercion(name, raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "currency": "idr",
            "pair": "btc_idr",
            "trade_id": "1244623",
            "order_id": "2234567",
            "type": "sell",
            "btc": "0.00134000",
            "price": "1048999000",
            "fee": "2811",
            "trade_time": "1700000000",
            "client_order_id": "clientx-sj82ks82j"
        })
    }

    #[test]
    fn test_coerces_string_fields() {
        let record = TradeRecord::from_json(&sample()).unwrap();
        assert_eq!(record.pair, Pair::new("btc", "idr"));
        assert_eq!(record.trade_id, 1244623);
        assert_eq!(record.order_id, 2234567);
        assert_eq!(record.volume_symbol, "btc");
        assert_eq!(record.volume, Decimal::from_str("0.00134").unwrap());
        assert_eq!(record.price, Decimal::from(1048999000));
        assert_eq!(record.trade_time, 1700000000);
        assert_eq!(record.client_order_id, "clientx-sj82ks82j");
        assert!(!record.is_buy());
    }

    #[test]
    fn test_idr_value_floors() {
        let record = TradeRecord::from_json(&sample()).unwrap();
        // 0.00134 * 1048999000 = 1405658.66
        assert_eq!(record.idr_value().unwrap(), Decimal::from(1405658));
    }

    #[test]
    fn test_numeric_json_and_generic_volume() {
        let record = TradeRecord::from_json(&json!({
            "pair": "btc_idr",
            "trade_id": 5707,
            "order_id": 1106,
            "type": "buy",
            "price": 900000000,
            "volume": 0.5,
            "fee": 0.0025,
            "trade_time": 1700000000,
            "client_order_id": ""
        }))
        .unwrap();
        assert_eq!(record.volume_symbol, "btc");
        assert_eq!(record.idr_value().unwrap(), Decimal::from(450000000));
        assert!(record.is_buy());
        assert_eq!(record.trade_id, 5707);
        assert_eq!(record.order_id, 1106);
    }

    #[test]
    fn test_unknown_type_kept_verbatim() {
        let mut value = sample();
        value["type"] = json!("weird");
        let record = TradeRecord::from_json(&value).unwrap();
        assert_eq!(record.trade_type, "weird");
        assert!(!record.is_buy());
    }

    #[test]
    fn test_non_numeric_price() {
        let mut value = sample();
        value["price"] = json!("abc");
        let err = TradeRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, IndodaxError::Coercion { ref field, .. } if field == "price"));
    }

    #[test]
    fn test_missing_amount_field() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("btc");
        let err = TradeRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, IndodaxError::Schema(_)));
    }

    #[test]
    fn test_missing_fee() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("fee");
        assert!(matches!(
            TradeRecord::from_json(&value),
            Err(IndodaxError::Schema(_))
        ));
    }

    #[test]
    fn test_missing_trade_id() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("trade_id");
        let err = TradeRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, IndodaxError::Schema(ref msg) if msg.contains("trade_id")));
    }

    #[test]
    fn test_missing_order_and_client_ids() {
        for field in ["order_id", "client_order_id"] {
            let mut value = sample();
            value.as_object_mut().unwrap().remove(field);
            assert!(
                matches!(TradeRecord::from_json(&value), Err(IndodaxError::Schema(_))),
                "missing {field} was accepted"
            );
        }
    }

    #[test]
    fn test_non_numeric_trade_id() {
        let mut value = sample();
        value["trade_id"] = json!("T-1");
        let err = TradeRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, IndodaxError::Coercion { ref field, .. } if field == "trade_id"));
    }
}

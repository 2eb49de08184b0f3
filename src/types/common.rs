//! Common domain types for the Indodax API.

use serde::{Deserialize, Serialize};

use crate::error::IndodaxError;

/// Quote currency used when none is given.
pub const DEFAULT_QUOTE: &str = "idr";

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Wire value of the side (`buy` / `sell`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trading pair such as `btc_idr`.
///
/// Converting from a bare coin symbol uses the default `idr` quote:
///
/// ```
/// use indodax_api_client::types::Pair;
///
/// assert_eq!(Pair::from("btc").to_string(), "btc_idr");
/// assert_eq!(Pair::from(("eth", "btc")).to_string(), "eth_btc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    base: String,
    quote: String,
}

impl Pair {
    /// Create a pair from base and quote currency symbols.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Create a pair quoted in rupiah.
    pub fn idr(base: impl Into<String>) -> Self {
        Self::new(base, DEFAULT_QUOTE)
    }

    /// Parse a wire pair symbol (`base_quote`).
    pub fn parse(symbol: &str) -> Result<Self, IndodaxError> {
        match symbol.split_once('_') {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base, quote))
            }
            _ => Err(IndodaxError::coercion("pair", symbol, "expected `base_quote`")),
        }
    }

    /// The asset being traded.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The asset used to price the trade.
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Symbol without the separator, e.g. `btcidr`.
    pub fn compact(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

impl From<&str> for Pair {
    fn from(coin: &str) -> Self {
        Pair::idr(coin)
    }
}

impl From<String> for Pair {
    fn from(coin: String) -> Self {
        Pair::idr(coin)
    }
}

impl From<(&str, &str)> for Pair {
    fn from((base, quote): (&str, &str)) -> Self {
        Pair::new(base, quote)
    }
}

impl From<&Pair> for Pair {
    fn from(pair: &Pair) -> Self {
        pair.clone()
    }
}

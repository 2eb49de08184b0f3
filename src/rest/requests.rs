//! Request builders for private endpoints with optional parameters.

use crate::types::RequestParams;

/// Parameters for a coin withdrawal (`withdrawCoin`).
///
/// Memo and request id default to empty strings and are always sent.
///
/// ```
/// use indodax_api_client::rest::WithdrawRequest;
///
/// let request = WithdrawRequest::new("xrp", "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh", "25")
///     .memo("104567")
///     .request_id("wd-0001");
/// assert_eq!(request.currency, "xrp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Coin symbol, e.g. `btc`.
    pub currency: String,
    /// Destination address.
    pub address: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// Destination tag / memo for coins that need one.
    pub memo: String,
    /// Caller-chosen id used by the exchange's withdrawal callback.
    pub request_id: String,
}

impl WithdrawRequest {
    /// Create a withdrawal with an empty memo and request id.
    pub fn new(
        currency: impl Into<String>,
        address: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            address: address.into(),
            amount: amount.into(),
            memo: String::new(),
            request_id: String::new(),
        }
    }

    /// Set the memo.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Set the request id.
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub(crate) fn to_params(&self) -> RequestParams {
        RequestParams::new()
            .with("currency", &self.currency)
            .with("withdraw_address", &self.address)
            .with("withdraw_amount", &self.amount)
            .with("withdraw_memo", &self.memo)
            .with("request_id", &self.request_id)
    }
}

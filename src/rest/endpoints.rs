//! Indodax REST API endpoint constants.

/// Base URL for the Indodax REST API.
pub const INDODAX_BASE_URL: &str = "https://indodax.com";

/// Path of the private (trade) API. Every private call is a POST here.
pub const PRIVATE_PATH: &str = "/tapi/";

/// Path prefix of the public ticker endpoint, followed by the compact pair.
pub const TICKER_PATH: &str = "/api/ticker/";

/// Private API method names, sent in the `method` form parameter.
pub mod methods {
    /// Balances and account information.
    pub const GET_INFO: &str = "getInfo";
    /// Deposit and withdrawal history.
    pub const TRANS_HISTORY: &str = "transHistory";
    /// Place a buy or sell order.
    pub const TRADE: &str = "trade";
    /// Executed trades for a pair.
    pub const TRADE_HISTORY: &str = "tradeHistory";
    /// Open orders for a pair.
    pub const OPEN_ORDERS: &str = "openOrders";
    /// Order history for a pair.
    pub const ORDER_HISTORY: &str = "orderHistory";
    /// Details of a single order.
    pub const GET_ORDER: &str = "getOrder";
    /// Cancel an open order.
    pub const CANCEL_ORDER: &str = "cancelOrder";
    /// Withdraw coins to an external address.
    pub const WITHDRAW_COIN: &str = "withdrawCoin";
}

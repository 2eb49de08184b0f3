//! Trait definition for the Indodax private API.
//!
//! [`IndodaxApi`] has a single required method, [`IndodaxApi::authenticated_call`];
//! every trading operation is a provided method that only shapes the request
//! parameters and delegates to it. This enables:
//! - Mock implementations for testing parameter shapes without a network
//! - Decorators (e.g. logging or dry-run wrappers)
//!
//! # Example
//!
//! ```rust,ignore
//! use indodax_api_client::rest::IndodaxApi;
//!
//! async fn show_balance<C: IndodaxApi>(client: &C) -> indodax_api_client::Result<()> {
//!     println!("{}", client.get_info().await?);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::IndodaxError;
use crate::rest::endpoints::methods;
use crate::rest::requests::WithdrawRequest;
use crate::types::{Pair, RequestParams, Side};

/// Operations of the Indodax private API.
///
/// All methods return the exchange's JSON response pretty-printed with
/// 4-space indentation. `pair` arguments accept a coin symbol (`"btc"`,
/// quoted in `idr`), a `(base, quote)` tuple or a [`Pair`].
///
/// Prices and amounts are passed through as opaque decimal strings.
pub trait IndodaxApi: Send + Sync {
    /// Sign and send a private call with the given method name and parameters.
    fn authenticated_call(
        &self,
        method: &str,
        params: RequestParams,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send;

    /// Get balances and account information (`getInfo`).
    fn get_info(&self) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        self.authenticated_call(methods::GET_INFO, RequestParams::new())
    }

    /// Get deposit and withdrawal history (`transHistory`).
    fn history(&self) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        self.authenticated_call(methods::TRANS_HISTORY, RequestParams::new())
    }

    /// Get executed trades for a pair (`tradeHistory`).
    fn trade_history(
        &self,
        pair: impl Into<Pair>,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let params = pair_params(pair);
        self.authenticated_call(methods::TRADE_HISTORY, params)
    }

    /// Place a buy order.
    ///
    /// The spend amount is sent under the quote currency's symbol, e.g.
    /// `idr=50000` for `btc_idr`.
    fn trade_buy(
        &self,
        pair: impl Into<Pair>,
        price: &str,
        amount: &str,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let pair = pair.into();
        let params = RequestParams::new()
            .with("pair", &pair)
            .with("type", Side::Buy)
            .with("price", price)
            .with(pair.quote(), amount);
        self.authenticated_call(methods::TRADE, params)
    }

    /// Place a sell order.
    ///
    /// The amount is sent under the base coin's symbol, e.g. `btc=0.01`
    /// for `btc_idr`.
    fn trade_sell(
        &self,
        pair: impl Into<Pair>,
        price: &str,
        amount: &str,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let pair = pair.into();
        let params = RequestParams::new()
            .with("pair", &pair)
            .with("type", Side::Sell)
            .with("price", price)
            .with(pair.base(), amount);
        self.authenticated_call(methods::TRADE, params)
    }

    /// List open orders for a pair (`openOrders`).
    fn open_order(
        &self,
        pair: impl Into<Pair>,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let params = pair_params(pair);
        self.authenticated_call(methods::OPEN_ORDERS, params)
    }

    /// List past orders for a pair (`orderHistory`).
    fn order_history(
        &self,
        pair: impl Into<Pair>,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let params = pair_params(pair);
        self.authenticated_call(methods::ORDER_HISTORY, params)
    }

    /// Get a single order (`getOrder`).
    fn get_order(
        &self,
        pair: impl Into<Pair>,
        order_id: &str,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let params = pair_params(pair).with("order_id", order_id);
        self.authenticated_call(methods::GET_ORDER, params)
    }

    /// Cancel an open order on the given side (`cancelOrder`).
    fn cancel_order(
        &self,
        pair: impl Into<Pair>,
        order_id: &str,
        side: Side,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        let params = pair_params(pair)
            .with("order_id", order_id)
            .with("type", side);
        self.authenticated_call(methods::CANCEL_ORDER, params)
    }

    /// Cancel an open buy order.
    fn cancel_order_buy(
        &self,
        pair: impl Into<Pair>,
        order_id: &str,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        self.cancel_order(pair, order_id, Side::Buy)
    }

    /// Cancel an open sell order.
    fn cancel_order_sell(
        &self,
        pair: impl Into<Pair>,
        order_id: &str,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        self.cancel_order(pair, order_id, Side::Sell)
    }

    /// Withdraw coins to an external address (`withdrawCoin`).
    fn withdraw(
        &self,
        request: &WithdrawRequest,
    ) -> impl Future<Output = Result<String, IndodaxError>> + Send {
        self.authenticated_call(methods::WITHDRAW_COIN, request.to_params())
    }
}

fn pair_params(pair: impl Into<Pair>) -> RequestParams {
    RequestParams::new().with("pair", pair.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records calls instead of sending them.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, RequestParams)>>,
    }

    impl Recorder {
        fn last(&self) -> (String, RequestParams) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl IndodaxApi for Recorder {
        async fn authenticated_call(
            &self,
            method: &str,
            params: RequestParams,
        ) -> Result<String, IndodaxError> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params));
            Ok("{}".to_string())
        }
    }

    fn pairs(params: &RequestParams) -> Vec<(String, String)> {
        params
            .keys()
            .map(|k| (k.to_string(), params.get(k).unwrap_or_default().to_string()))
            .collect()
    }

    fn expected(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_get_info_has_no_params() {
        let api = Recorder::default();
        api.get_info().await.unwrap();
        let (method, params) = api.last();
        assert_eq!(method, "getInfo");
        assert!(params.is_empty());

        api.history().await.unwrap();
        assert_eq!(api.last().0, "transHistory");
    }

    #[tokio::test]
    async fn test_trade_buy_amount_under_quote() {
        let api = Recorder::default();
        api.trade_buy("btc", "100000000", "0.01").await.unwrap();
        let (method, params) = api.last();
        assert_eq!(method, "trade");
        assert_eq!(
            pairs(&params),
            expected(&[
                ("pair", "btc_idr"),
                ("type", "buy"),
                ("price", "100000000"),
                ("idr", "0.01"),
            ])
        );
    }

    #[tokio::test]
    async fn test_trade_sell_amount_under_base() {
        let api = Recorder::default();
        api.trade_sell("btc", "100000000", "0.01").await.unwrap();
        let (method, params) = api.last();
        assert_eq!(method, "trade");
        assert_eq!(
            pairs(&params),
            expected(&[
                ("pair", "btc_idr"),
                ("type", "sell"),
                ("price", "100000000"),
                ("btc", "0.01"),
            ])
        );
    }

    #[tokio::test]
    async fn test_trade_with_btc_quote() {
        let api = Recorder::default();
        api.trade_buy(("eth", "btc"), "0.05", "0.1").await.unwrap();
        let (_, params) = api.last();
        assert_eq!(params.get("pair"), Some("eth_btc"));
        assert_eq!(params.get("btc"), Some("0.1"));
    }

    #[tokio::test]
    async fn test_pair_only_methods() {
        let api = Recorder::default();

        api.trade_history("eth").await.unwrap();
        assert_eq!(api.last().0, "tradeHistory");
        assert_eq!(pairs(&api.last().1), expected(&[("pair", "eth_idr")]));

        api.open_order("eth").await.unwrap();
        assert_eq!(api.last().0, "openOrders");
        assert_eq!(pairs(&api.last().1), expected(&[("pair", "eth_idr")]));

        api.order_history(Pair::new("doge", "idr")).await.unwrap();
        assert_eq!(api.last().0, "orderHistory");
        assert_eq!(pairs(&api.last().1), expected(&[("pair", "doge_idr")]));
    }

    #[tokio::test]
    async fn test_order_lookup_and_cancel() {
        let api = Recorder::default();

        api.get_order("btc", "1234").await.unwrap();
        assert_eq!(api.last().0, "getOrder");
        assert_eq!(
            pairs(&api.last().1),
            expected(&[("pair", "btc_idr"), ("order_id", "1234")])
        );

        api.cancel_order_buy("btc", "1234").await.unwrap();
        assert_eq!(api.last().0, "cancelOrder");
        assert_eq!(
            pairs(&api.last().1),
            expected(&[("pair", "btc_idr"), ("order_id", "1234"), ("type", "buy")])
        );

        api.cancel_order_sell("btc", "1234").await.unwrap();
        assert_eq!(api.last().1.get("type"), Some("sell"));
    }

    #[tokio::test]
    async fn test_withdraw_defaults() {
        let api = Recorder::default();
        let request = WithdrawRequest::new("btc", "1BoatSLRHtKNngkdXEeobR76b53LETtpyT", "0.5");
        api.withdraw(&request).await.unwrap();

        let (method, params) = api.last();
        assert_eq!(method, "withdrawCoin");
        assert_eq!(
            pairs(&params),
            expected(&[
                ("currency", "btc"),
                ("withdraw_address", "1BoatSLRHtKNngkdXEeobR76b53LETtpyT"),
                ("withdraw_amount", "0.5"),
                ("withdraw_memo", ""),
                ("request_id", ""),
            ])
        );
    }
}

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use indodax_api_client::auth::{StaticCredentials, sign_payload};
use indodax_api_client::error::IndodaxError;
use indodax_api_client::rest::{IndodaxApi, IndodaxRestClient, WithdrawRequest};

const SECRET: &[u8] = b"test_secret";

fn build_client(server: &MockServer) -> IndodaxRestClient {
    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET.to_vec()));
    IndodaxRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build()
        .unwrap()
}

/// Matches only when the `Sign` header is the HMAC of the received body.
fn signed_body(request: &Request) -> bool {
    let Some(sign) = request.headers.get("Sign").and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let Ok(body) = std::str::from_utf8(&request.body) else {
        return false;
    };
    sign_payload(SECRET, body).is_ok_and(|expected| expected == sign)
}

fn form(request: &Request) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

#[tokio::test]
async fn test_get_info_signed_and_pretty_printed() {
    let server = MockServer::start().await;
    let body = r#"{"success":1,"return":{"server_time":1700000000,"balance":{"idr":"1500000","btc":"0.01"}}}"#;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(header("Key", "test_key"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("method=getInfo"))
        .and(signed_body)
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let info = client.get_info().await.unwrap();

    assert_eq!(
        info,
        "{\n    \"success\": 1,\n    \"return\": {\n        \"server_time\": 1700000000,\n        \"balance\": {\n            \"idr\": \"1500000\",\n            \"btc\": \"0.01\"\n        }\n    }\n}"
    );
}

#[tokio::test]
async fn test_trade_buy_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(signed_body)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": 1, "return": {"order_id": 11}})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.trade_buy("btc", "100000000", "50000").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let fields = form(&requests[0]);
    let names: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["pair", "type", "price", "idr", "method", "nonce"]);
    assert_eq!(fields[0].1, "btc_idr");
    assert_eq!(fields[1].1, "buy");
    assert_eq!(fields[2].1, "100000000");
    assert_eq!(fields[3].1, "50000");
    assert_eq!(fields[4].1, "trade");
}

#[tokio::test]
async fn test_nonce_increases_between_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": 1})))
        .mount(&server)
        .await;

    let client = build_client(&server);
    for _ in 0..5 {
        client.history().await.unwrap();
    }

    let nonces: Vec<u64> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            form(request)
                .into_iter()
                .find(|(k, _)| k == "nonce")
                .map(|(_, v)| v.parse().unwrap())
                .unwrap()
        })
        .collect();

    assert_eq!(nonces.len(), 5);
    assert!(nonces.windows(2).all(|w| w[0] < w[1]), "nonces: {nonces:?}");
}

#[tokio::test]
async fn test_withdraw_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("method=withdrawCoin"))
        .and(body_string_contains("withdraw_memo=104567"))
        .and(body_string_contains("request_id=wd-1"))
        .and(signed_body)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "status": "approved",
            "withdraw_currency": "xrp"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = WithdrawRequest::new("xrp", "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh", "25")
        .memo("104567")
        .request_id("wd-1");
    let response = client.withdraw(&request).await.unwrap();
    assert!(response.contains("\"status\": \"approved\""));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.trade_sell("btc", "100000000", "0.01").await.unwrap_err();

    match err {
        IndodaxError::Request { operation, source } => {
            assert_eq!(operation, "trade");
            assert!(matches!(
                *source,
                IndodaxError::HttpStatus { status: 500, ref body } if body == "maintenance"
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_names_operation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.cancel_order_buy("btc", "42").await.unwrap_err();
    assert!(err.to_string().starts_with("cancelOrder failed: JSON error"));
}

#[tokio::test]
async fn test_get_price_uses_public_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ticker/ethidr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ticker": { "last": "30000000" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ticker = client.get_price("eth").await.unwrap();
    assert_eq!(ticker["ticker"]["last"], "30000000");
}

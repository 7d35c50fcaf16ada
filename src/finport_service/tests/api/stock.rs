use crate::helpers::{StubMarketDataClient, TestApp};

#[tokio::test]
async fn price_proxies_the_quote() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/stock/price?symbol=AAPL").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["price"], 123.45);
    assert!(body.get("time").is_some());
}

#[tokio::test]
async fn price_requires_a_symbol() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/stock/price").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Symbol is required");
}

#[tokio::test]
async fn candles_proxy_the_bars() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/stock/candles?symbol=AAPL").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["symbol"], "AAPL");
    let candles = body["candles"].as_array().unwrap();
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0]["open"], 120.0);
    assert_eq!(candles[0]["close"], 123.45);
    assert_eq!(candles[0]["time"], "2024-01-02");
}

#[tokio::test]
async fn missing_candle_data_is_404() {
    let app = TestApp::spawn_with_market_data(StubMarketDataClient { no_data: true }).await;

    let response = app.get("/api/stock/candles?symbol=NOPE").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No candlestick data found");
}

#[tokio::test]
async fn missing_price_data_is_404() {
    let app = TestApp::spawn_with_market_data(StubMarketDataClient { no_data: true }).await;

    let response = app.get("/api/stock/price?symbol=NOPE").await;

    assert_eq!(response.status().as_u16(), 404);
}

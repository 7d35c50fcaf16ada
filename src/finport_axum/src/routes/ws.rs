use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use finport_core::{Candle, MarketDataError};

use crate::state::AppState;

const CANDLE_WINDOW_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Push-style stock data channel: the client asks for a symbol, the server
/// replies on the same socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WsRequest {
    #[serde(rename = "getStockPrice")]
    GetStockPrice { symbol: String },
    #[serde(rename = "getStockCandles")]
    GetStockCandles { symbol: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum WsResponse {
    #[serde(rename = "stockPrice")]
    StockPrice {
        symbol: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        time: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    #[serde(rename = "stockCandles")]
    StockCandles {
        symbol: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        candles: Option<Vec<Candle>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

#[tracing::instrument(name = "WebSocket upgrade", skip_all)]
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::info!("WebSocket client connected");

    while let Some(Ok(message)) = socket.recv().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let response = handle_request(text.as_str(), &state).await;

        let Ok(json) = serde_json::to_string(&response) else {
            break;
        };
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }

    tracing::info!("WebSocket client disconnected");
}

async fn handle_request(text: &str, state: &AppState) -> WsResponse {
    match serde_json::from_str::<WsRequest>(text) {
        Ok(WsRequest::GetStockPrice { symbol }) => match state.market_data.quote(&symbol).await {
            Ok(quote) => WsResponse::StockPrice {
                symbol,
                price: Some(quote.price),
                time: Some(
                    quote
                        .time
                        .unwrap_or_else(Utc::now)
                        .to_rfc3339(),
                ),
                error: None,
            },
            Err(error) => WsResponse::StockPrice {
                symbol,
                price: None,
                time: None,
                error: Some(price_error_text(error)),
            },
        },
        Ok(WsRequest::GetStockCandles { symbol }) => {
            let to = Utc::now().timestamp();
            let from = to - CANDLE_WINDOW_SECONDS;
            match state.market_data.candles(&symbol, "D", from, to).await {
                Ok(candles) => WsResponse::StockCandles {
                    symbol,
                    candles: Some(candles),
                    error: None,
                },
                Err(error) => WsResponse::StockCandles {
                    symbol,
                    candles: None,
                    error: Some(candle_error_text(error)),
                },
            }
        }
        Err(_) => WsResponse::Error {
            message: "Unrecognized message".to_string(),
        },
    }
}

fn price_error_text(error: MarketDataError) -> String {
    match error {
        MarketDataError::NoData => "No price data found".to_string(),
        MarketDataError::Upstream(details) => details,
    }
}

fn candle_error_text(error: MarketDataError) -> String {
    match error {
        MarketDataError::NoData => "No candle data found".to_string(),
        MarketDataError::Upstream(details) => details,
    }
}

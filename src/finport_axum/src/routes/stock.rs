use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use finport_core::MarketDataError;

use super::error::ApiError;
use crate::state::AppState;

const DEFAULT_RESOLUTION: &str = "D";
const DEFAULT_WINDOW_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Deserialize)]
pub struct PriceQuery {
    pub symbol: Option<String>,
}

#[derive(Deserialize)]
pub struct CandlesQuery {
    pub symbol: Option<String>,
    pub resolution: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

fn require_symbol(symbol: Option<String>) -> Result<String, ApiError> {
    symbol
        .filter(|symbol| !symbol.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Symbol is required".to_string()))
}

#[tracing::instrument(name = "Stock price", skip_all)]
pub async fn stock_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = require_symbol(query.symbol)?;

    let quote = state
        .market_data
        .quote(&symbol)
        .await
        .map_err(|error| match error {
            MarketDataError::NoData => ApiError::NotFound("No price data found".to_string()),
            MarketDataError::Upstream(details) => {
                ApiError::DependencyFailure(format!("Failed to fetch price: {details}"))
            }
        })?;

    Ok(Json(quote))
}

#[tracing::instrument(name = "Stock candles", skip_all)]
pub async fn stock_candles(
    State(state): State<AppState>,
    Query(query): Query<CandlesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = require_symbol(query.symbol)?;
    let resolution = query
        .resolution
        .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string());

    // Unless the caller pins the window, serve the last 30 days.
    let (from, to) = match (query.from, query.to) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            let to = Utc::now().timestamp();
            (to - DEFAULT_WINDOW_SECONDS, to)
        }
    };

    let candles = state
        .market_data
        .candles(&symbol, &resolution, from, to)
        .await
        .map_err(|error| match error {
            MarketDataError::NoData => {
                ApiError::NotFound("No candlestick data found".to_string())
            }
            MarketDataError::Upstream(details) => {
                ApiError::DependencyFailure(format!("Failed to fetch candles: {details}"))
            }
        })?;

    Ok(Json(serde_json::json!({
        "symbol": symbol,
        "candles": candles,
    })))
}

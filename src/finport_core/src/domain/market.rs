use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Latest price for a symbol, as reported by the market-data provider.
#[derive(Clone, Debug, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub time: Option<DateTime<Utc>>,
}

/// One daily OHLC bar.
#[derive(Clone, Debug, Serialize)]
pub struct Candle {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

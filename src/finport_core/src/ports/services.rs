use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    market::{Candle, Quote},
};

#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError>;
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("No data found for symbol")]
    NoData,
    #[error("Market data request failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait MarketDataClient: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
    async fn candles(
        &self,
        symbol: &str,
        resolution: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

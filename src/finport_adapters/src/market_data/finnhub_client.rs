use chrono::DateTime;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use finport_core::{Candle, MarketDataClient, MarketDataError, Quote};

/// Thin pass-through client for the Finnhub REST API.
pub struct FinnhubClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl FinnhubClient {
    pub fn new(base_url: String, api_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn upstream<E: std::fmt::Display>(error: E) -> MarketDataError {
    MarketDataError::Upstream(error.to_string())
}

// Finnhub column names: c (current/close), t (timestamp), o (open),
// h (high), l (low), s (status).
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    c: f64,
    #[serde(default)]
    t: i64,
}

#[derive(Debug, Deserialize)]
struct CandleResponse {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<f64>,
    #[serde(default)]
    h: Vec<f64>,
    #[serde(default)]
    l: Vec<f64>,
    #[serde(default)]
    c: Vec<f64>,
}

#[async_trait::async_trait]
impl MarketDataClient for FinnhubClient {
    #[tracing::instrument(name = "Fetching quote", skip(self))]
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let data: QuoteResponse = self
            .http_client
            .get(self.endpoint("quote"))
            .query(&[("symbol", symbol), ("token", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        // Finnhub reports all-zero quotes for unknown symbols.
        if data.c == 0.0 {
            return Err(MarketDataError::NoData);
        }

        Ok(Quote {
            symbol: symbol.to_string(),
            price: data.c,
            time: (data.t > 0)
                .then(|| DateTime::from_timestamp(data.t, 0))
                .flatten(),
        })
    }

    #[tracing::instrument(name = "Fetching candles", skip(self))]
    async fn candles(
        &self,
        symbol: &str,
        resolution: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let from = from.to_string();
        let to = to.to_string();
        let data: CandleResponse = self
            .http_client
            .get(self.endpoint("stock/candle"))
            .query(&[
                ("symbol", symbol),
                ("resolution", resolution),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        if data.s != "ok" {
            return Err(MarketDataError::NoData);
        }

        let rows = data
            .t
            .len()
            .min(data.o.len())
            .min(data.h.len())
            .min(data.l.len())
            .min(data.c.len());

        let mut candles = Vec::with_capacity(rows);
        for i in 0..rows {
            let time = DateTime::from_timestamp(data.t[i], 0)
                .ok_or_else(|| upstream("invalid candle timestamp"))?
                .date_naive();
            candles.push(Candle {
                time,
                open: data.o[i],
                high: data.h[i],
                low: data.l[i],
                close: data.c[i],
            });
        }
        Ok(candles)
    }
}

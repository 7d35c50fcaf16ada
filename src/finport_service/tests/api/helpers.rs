use std::sync::Arc;

use secrecy::Secret;

use finport_adapters::config::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS};
use finport_adapters::email::MockEmailClient;
use finport_adapters::persistence::{
    InMemoryCooldownTracker, InMemoryOtpStore, InMemoryUserStore,
};
use finport_adapters::session::SessionConfig;
use finport_axum::AppState;
use finport_core::{
    Candle, CooldownTracker, Email, MarketDataClient, MarketDataError, OtpStore, Quote,
};
use finport_service::FinportService;

/// Canned market data; the real Finnhub client has its own wiremock suite.
#[derive(Clone, Default)]
pub struct StubMarketDataClient {
    pub no_data: bool,
}

#[async_trait::async_trait]
impl MarketDataClient for StubMarketDataClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        if self.no_data {
            return Err(MarketDataError::NoData);
        }
        Ok(Quote {
            symbol: symbol.to_string(),
            price: 123.45,
            time: Some(chrono::Utc::now()),
        })
    }

    async fn candles(
        &self,
        _symbol: &str,
        _resolution: &str,
        _from: i64,
        _to: i64,
    ) -> Result<Vec<Candle>, MarketDataError> {
        if self.no_data {
            return Err(MarketDataError::NoData);
        }
        Ok(vec![Candle {
            time: chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 120.0,
            high: 125.0,
            low: 119.5,
            close: 123.45,
        }])
    }
}

/// A full backend instance on an ephemeral port, with handles on the
/// injected stores so tests can look behind the HTTP surface.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub otp_store: InMemoryOtpStore,
    pub cooldown: InMemoryCooldownTracker,
    pub email_client: MockEmailClient,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_market_data(StubMarketDataClient::default()).await
    }

    pub async fn spawn_with_market_data(market_data: StubMarketDataClient) -> Self {
        let otp_store = InMemoryOtpStore::new();
        let cooldown = InMemoryCooldownTracker::new();
        let user_store = InMemoryUserStore::new();
        let email_client = MockEmailClient::new();

        let state = AppState {
            user_store: Arc::new(user_store),
            otp_store: Arc::new(otp_store.clone()),
            cooldown: Arc::new(cooldown.clone()),
            email_client: Arc::new(email_client.clone()),
            market_data: Arc::new(market_data),
            session_config: SessionConfig {
                cookie_name: SESSION_COOKIE_NAME.to_string(),
                jwt_secret: Secret::from("test-jwt-secret".to_string()),
                ttl_seconds: SESSION_TTL_SECONDS,
                secure_cookies: false,
            },
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(FinportService::new(state).run(listener, None));

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build test client");

        Self {
            address,
            client,
            otp_store,
            cooldown,
            email_client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("request failed")
    }

    /// Read the code that the issuance flow stored for this email.
    pub async fn issued_code(&self, email: &str) -> String {
        let email = parse_email(email);
        self.otp_store
            .peek(&email)
            .await
            .unwrap()
            .expect("no OTP issued for this email")
            .code
            .as_str()
            .to_string()
    }

    /// Drop the resend stamp so a test can request another code right away.
    pub async fn clear_cooldown(&self, email: &str) {
        self.cooldown.clear(&parse_email(email)).await.unwrap();
    }

    /// Drive the whole signup flow: request a code, verify it, create the
    /// account, and lift the resend cooldown for subsequent steps.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) {
        let response = self
            .post_json(
                "/api/user/request-otp",
                &serde_json::json!({ "email": email, "isSignup": true }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200, "request-otp failed");

        let code = self.issued_code(email).await;
        let response = self
            .post_json(
                "/api/user/verify-otp",
                &serde_json::json!({ "email": email, "otp": code }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200, "verify-otp failed");

        let response = self
            .post_json(
                "/api/user/create-user",
                &serde_json::json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "create-user failed");

        self.clear_cooldown(email).await;
    }
}

fn parse_email(email: &str) -> Email {
    Email::try_from(Secret::from(email.to_string())).unwrap()
}

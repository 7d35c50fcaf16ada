use std::sync::Arc;

use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use finport_adapters::config::{AllowedOrigins, Settings};
use finport_adapters::email::PostmarkEmailClient;
use finport_adapters::market_data::FinnhubClient;
use finport_adapters::persistence::{
    InMemoryCooldownTracker, InMemoryOtpStore, InMemoryUserStore, PostgresUserStore,
    RedisCooldownTracker, RedisOtpStore,
};
use finport_axum::AppState;
use finport_core::{CooldownTracker, Email, OtpStore, UserStore};
use finport_service::FinportService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    dotenvy::dotenv().ok();
    init_tracing().expect("Failed to initialize tracing");

    let settings = Settings::load()?;

    // Credential store: Postgres when configured, volatile map otherwise.
    let user_store: Arc<dyn UserStore> = match &settings.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url.expose_secret())
                .await?;

            sqlx::migrate!().run(&pg_pool).await?;

            Arc::new(PostgresUserStore::new(pg_pool))
        }
        None => {
            tracing::warn!("no database configured, user accounts will not survive a restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    // Ephemeral stores: Redis when configured, per-key in-memory maps otherwise.
    let (otp_store, cooldown): (Arc<dyn OtpStore>, Arc<dyn CooldownTracker>) =
        match &settings.redis.host_name {
            Some(host_name) => {
                let redis_client = redis::Client::open(format!("redis://{}/", host_name))?;
                let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));
                (
                    Arc::new(RedisOtpStore::new(redis_conn.clone())),
                    Arc::new(RedisCooldownTracker::new(redis_conn)),
                )
            }
            None => (
                Arc::new(InMemoryOtpStore::new()),
                Arc::new(InMemoryCooldownTracker::new()),
            ),
        };

    let http_client = reqwest::Client::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let sender = Email::try_from(Secret::from(settings.email_client.sender.clone()))?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client.clone(),
    );

    let market_data = FinnhubClient::new(
        settings.finnhub.base_url.clone(),
        settings.finnhub.api_key.clone(),
        http_client,
    );

    let state = AppState {
        user_store,
        otp_store,
        cooldown,
        email_client: Arc::new(email_client),
        market_data: Arc::new(market_data),
        session_config: settings.session_config(),
    };

    let allowed_origins = AllowedOrigins::parse(&settings.application.allowed_origins);

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;
    tracing::info!("Starting FinPort backend...");

    FinportService::new(state)
        .run(listener, Some(allowed_origins))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

use axum::http::HeaderValue;
use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{
    SESSION_COOKIE_NAME, SESSION_TTL_SECONDS, defaults,
};
use crate::session::SessionConfig;

/// Runtime configuration, read from `FINPORT_`-prefixed environment
/// variables (`__` separates nesting, e.g. `FINPORT_APPLICATION__PORT`).
/// Every key has a development-friendly default.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub email_client: EmailClientSettings,
    pub finnhub: FinnhubSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub redis: RedisSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub allowed_origins: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub jwt_secret: Secret<String>,
    pub cookie_name: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<Secret<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisSettings {
    #[serde(default)]
    pub host_name: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("application.host", defaults::APP_HOST)?
            .set_default("application.port", defaults::APP_PORT as i64)?
            .set_default("application.environment", "dev")?
            .set_default("application.allowed_origins", defaults::ALLOWED_ORIGINS)?
            .set_default(
                "session.jwt_secret",
                "fallback-secret-key-change-in-production",
            )?
            .set_default("session.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("session.ttl_seconds", SESSION_TTL_SECONDS)?
            .set_default("email_client.base_url", defaults::email_client::BASE_URL)?
            .set_default("email_client.sender", defaults::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_in_millis",
                defaults::email_client::TIMEOUT_IN_MILLIS,
            )?
            .set_default("finnhub.base_url", defaults::finnhub::BASE_URL)?
            .set_default("finnhub.api_key", "")?
            .add_source(config::Environment::with_prefix("FINPORT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cookie_name: self.session.cookie_name.clone(),
            jwt_secret: self.session.jwt_secret.clone(),
            ttl_seconds: self.session.ttl_seconds,
            secure_cookies: self.application.environment.is_production(),
        }
    }
}

/// CORS allow-list parsed from a comma-separated origin string.
#[derive(Clone, Debug)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
                .collect(),
        )
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}

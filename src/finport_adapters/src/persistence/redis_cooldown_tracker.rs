use std::sync::Arc;

use chrono::Utc;
use redis::{Commands, Connection};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use finport_core::{CooldownError, CooldownTracker, Email};

use crate::config::constants::RESEND_COOLDOWN_SECONDS;

/// Redis-backed resend throttle. The key TTL IS the cooldown, so the
/// remaining wait falls straight out of `TTL`.
#[derive(Clone)]
pub struct RedisCooldownTracker {
    conn: Arc<RwLock<Connection>>,
    cooldown_seconds: u64,
}

impl RedisCooldownTracker {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self {
            conn,
            cooldown_seconds: RESEND_COOLDOWN_SECONDS,
        }
    }
}

const COOLDOWN_KEY_PREFIX: &str = "otp_cooldown:";

fn get_key(email: &Email) -> String {
    format!("{}{}", COOLDOWN_KEY_PREFIX, email.as_ref().expose_secret())
}

fn unexpected<E: std::fmt::Display>(error: E) -> CooldownError {
    CooldownError::UnexpectedError(error.to_string())
}

#[async_trait::async_trait]
impl CooldownTracker for RedisCooldownTracker {
    async fn check(&self, email: &Email) -> Result<(), CooldownError> {
        let mut conn = self.conn.write().await;
        // TTL returns -2 for a missing key and -1 for a key without expiry.
        let remaining: i64 = conn.ttl(get_key(email)).map_err(unexpected)?;
        if remaining > 0 {
            return Err(CooldownError::Throttled {
                remaining_seconds: remaining as u64,
            });
        }
        Ok(())
    }

    async fn stamp(&self, email: &Email) -> Result<(), CooldownError> {
        let mut conn = self.conn.write().await;
        let _: () = conn
            .set_ex(
                get_key(email),
                Utc::now().timestamp(),
                self.cooldown_seconds,
            )
            .map_err(unexpected)?;
        Ok(())
    }

    async fn clear(&self, email: &Email) -> Result<(), CooldownError> {
        let mut conn = self.conn.write().await;
        let _: () = conn.del(get_key(email)).map_err(unexpected)?;
        Ok(())
    }
}

use std::sync::Arc;

use chrono::Duration;
use redis::{Commands, Connection};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use finport_core::{Email, OtpCode, OtpPurpose, OtpRecord, OtpStore, OtpStoreError};

use crate::config::constants::OTP_TTL_MINUTES;

/// Redis-backed OTP store for deployments that want codes to survive a
/// process restart.
///
/// Expiry decisions are made on `issued_at`, so an expired access can be told
/// apart from a missing record; the physical key TTL is only garbage
/// collection and is set to twice the logical window.
#[derive(Clone)]
pub struct RedisOtpStore {
    conn: Arc<RwLock<Connection>>,
    ttl: Duration,
}

impl RedisOtpStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self {
            conn,
            ttl: Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    fn physical_ttl_seconds(&self) -> u64 {
        (self.ttl.num_seconds() * 2).max(1) as u64
    }
}

// Key prefix to prevent collisions and organize data.
const OTP_KEY_PREFIX: &str = "otp:";

fn get_key(email: &Email) -> String {
    format!("{}{}", OTP_KEY_PREFIX, email.as_ref().expose_secret())
}

fn unexpected<E: std::fmt::Display>(error: E) -> OtpStoreError {
    OtpStoreError::UnexpectedError(error.to_string())
}

#[async_trait::async_trait]
impl OtpStore for RedisOtpStore {
    async fn issue(&self, email: Email, purpose: OtpPurpose) -> Result<OtpCode, OtpStoreError> {
        let code = OtpCode::new();
        let record = OtpRecord::new(code.clone(), purpose);
        let json = serde_json::to_string(&record).map_err(unexpected)?;

        let mut conn = self.conn.write().await;
        let _: () = conn
            .set_ex(get_key(&email), json, self.physical_ttl_seconds())
            .map_err(unexpected)?;
        Ok(code)
    }

    async fn verify(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError> {
        let key = get_key(email);
        let mut conn = self.conn.write().await;

        let value: Option<String> = conn.get(&key).map_err(unexpected)?;
        let Some(json) = value else {
            return Err(OtpStoreError::NotFound);
        };
        let mut record: OtpRecord = serde_json::from_str(&json).map_err(unexpected)?;

        if record.is_expired(self.ttl) {
            let _: () = conn.del(&key).map_err(unexpected)?;
            return Err(OtpStoreError::Expired);
        }
        if record.code != *code {
            return Err(OtpStoreError::Mismatch);
        }

        record.verified = true;
        let json = serde_json::to_string(&record).map_err(unexpected)?;
        let _: () = conn
            .set_ex(&key, json, self.physical_ttl_seconds())
            .map_err(unexpected)?;
        Ok(())
    }

    async fn peek(&self, email: &Email) -> Result<Option<OtpRecord>, OtpStoreError> {
        let key = get_key(email);
        let mut conn = self.conn.write().await;

        let value: Option<String> = conn.get(&key).map_err(unexpected)?;
        let Some(json) = value else {
            return Ok(None);
        };
        let record: OtpRecord = serde_json::from_str(&json).map_err(unexpected)?;

        if record.is_expired(self.ttl) {
            let _: () = conn.del(&key).map_err(unexpected)?;
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn consume(&self, email: &Email) -> Result<(), OtpStoreError> {
        let mut conn = self.conn.write().await;
        let _: () = conn.del(get_key(email)).map_err(unexpected)?;
        Ok(())
    }
}

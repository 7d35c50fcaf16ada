use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use finport_core::{CooldownError, CooldownTracker, Email};

use crate::config::constants::RESEND_COOLDOWN_SECONDS;

/// Process-local resend throttle keyed by email.
#[derive(Clone)]
pub struct InMemoryCooldownTracker {
    stamps: Arc<DashMap<Email, DateTime<Utc>>>,
    cooldown: Duration,
}

impl InMemoryCooldownTracker {
    pub fn new() -> Self {
        Self::with_cooldown(Duration::seconds(RESEND_COOLDOWN_SECONDS as i64))
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            stamps: Arc::new(DashMap::new()),
            cooldown,
        }
    }
}

impl Default for InMemoryCooldownTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CooldownTracker for InMemoryCooldownTracker {
    async fn check(&self, email: &Email) -> Result<(), CooldownError> {
        if let Some(last_issued_at) = self.stamps.get(email) {
            let elapsed = Utc::now() - *last_issued_at;
            if elapsed < self.cooldown {
                let remaining_ms = (self.cooldown - elapsed).num_milliseconds();
                // Ceiling-rounded so the caller never waits less than told.
                let remaining_seconds = ((remaining_ms + 999) / 1000) as u64;
                return Err(CooldownError::Throttled { remaining_seconds });
            }
        }
        Ok(())
    }

    async fn stamp(&self, email: &Email) -> Result<(), CooldownError> {
        self.stamps.insert(email.clone(), Utc::now());
        Ok(())
    }

    async fn clear(&self, email: &Email) -> Result<(), CooldownError> {
        self.stamps.remove(email);
        Ok(())
    }
}

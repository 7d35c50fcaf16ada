use std::sync::Arc;

use chrono::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use finport_core::{Email, OtpCode, OtpPurpose, OtpRecord, OtpStore, OtpStoreError};

use crate::config::constants::OTP_TTL_MINUTES;

/// Process-local OTP store keyed by email.
///
/// `DashMap` locks one shard per operation, so records for different emails
/// never contend on a shared lock.
#[derive(Clone)]
pub struct InMemoryOtpStore {
    records: Arc<DashMap<Email, OtpRecord>>,
    ttl: Duration,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(OTP_TTL_MINUTES))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            ttl,
        }
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn issue(&self, email: Email, purpose: OtpPurpose) -> Result<OtpCode, OtpStoreError> {
        let code = OtpCode::new();
        self.records
            .insert(email, OtpRecord::new(code.clone(), purpose));
        Ok(code)
    }

    async fn verify(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError> {
        // The entry holds the shard lock, so expire/verify is atomic per key.
        match self.records.entry(email.clone()) {
            Entry::Vacant(_) => Err(OtpStoreError::NotFound),
            Entry::Occupied(mut entry) => {
                if entry.get().is_expired(self.ttl) {
                    entry.remove();
                    return Err(OtpStoreError::Expired);
                }
                if entry.get().code != *code {
                    return Err(OtpStoreError::Mismatch);
                }
                entry.get_mut().verified = true;
                Ok(())
            }
        }
    }

    async fn peek(&self, email: &Email) -> Result<Option<OtpRecord>, OtpStoreError> {
        // Expired-access detection: a logically expired record reads as
        // absent and is physically removed on the way out.
        let ttl = self.ttl;
        self.records.remove_if(email, |_, record| record.is_expired(ttl));
        Ok(self.records.get(email).map(|record| record.clone()))
    }

    async fn consume(&self, email: &Email) -> Result<(), OtpStoreError> {
        self.records.remove(email);
        Ok(())
    }
}

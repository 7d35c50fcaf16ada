use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const OTP_CODE_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum OtpCodeError {
    #[error("OTP must be a 6-digit code")]
    InvalidFormat,
}

/// A 6-digit one-time passcode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a uniformly random code in the 100000..=999999 space.
    pub fn new() -> Self {
        let code = rand::rng().random_range(100_000..=999_999);
        Self(code.to_string())
    }

    pub fn parse(code: String) -> Result<Self, OtpCodeError> {
        if code.len() == OTP_CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(code))
        } else {
            Err(OtpCodeError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OtpCode {
    fn default() -> Self {
        Self::new()
    }
}

/// What the passcode was issued for. A signup code must never reset a password.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpPurpose {
    Signup,
    PasswordReset,
}

/// A pending passcode for one email address.
///
/// At most one record exists per address; re-issuing overwrites the prior one.
/// `verified` is flipped exactly once, by a successful verification, and the
/// record then survives until a consuming flow (account creation or password
/// reset) deletes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OtpRecord {
    pub code: OtpCode,
    pub issued_at: DateTime<Utc>,
    pub purpose: OtpPurpose,
    pub verified: bool,
}

impl OtpRecord {
    pub fn new(code: OtpCode, purpose: OtpPurpose) -> Self {
        Self {
            code,
            issued_at: Utc::now(),
            purpose,
            verified: false,
        }
    }

    /// Logically expired records are treated as absent even before any
    /// physical deletion happens.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.issued_at > ttl
    }
}

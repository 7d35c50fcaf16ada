use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp::{OtpCode, OtpPurpose, OtpRecord},
    password::Password,
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    /// Persist a new account, hashing the password. Enforces email uniqueness
    /// even against concurrent inserts (the uniqueness violation surfaces as
    /// `UserAlreadyExists`, never as a silent overwrite).
    async fn create(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn update_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    /// Check credentials. Callers must collapse `UserNotFound` and
    /// `IncorrectPassword` into one response so neither case is leaked.
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    #[error("No OTP found")]
    NotFound,
    #[error("OTP has expired")]
    Expired,
    #[error("OTP does not match")]
    Mismatch,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for OtpStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound, Self::NotFound) => true,
            (Self::Expired, Self::Expired) => true,
            (Self::Mismatch, Self::Mismatch) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Short-lived one-time passcodes, one active record per email.
///
/// Implementations must be atomic per key; operations on different emails
/// never contend on each other.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Generate and store a fresh code, overwriting any prior record.
    async fn issue(&self, email: Email, purpose: OtpPurpose) -> Result<OtpCode, OtpStoreError>;
    /// Check a submitted code. `Expired` deletes the record; `Mismatch`
    /// retains it so the user may retry; a match flips `verified` and retains
    /// the record for the consuming flow.
    async fn verify(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError>;
    /// Read-only lookup, used by consuming flows to inspect purpose/verified.
    async fn peek(&self, email: &Email) -> Result<Option<OtpRecord>, OtpStoreError>;
    /// Delete the record once it has been used. Idempotent.
    async fn consume(&self, email: &Email) -> Result<(), OtpStoreError>;
}

// CooldownTracker port trait and errors
#[derive(Debug, Error)]
pub enum CooldownError {
    #[error("Throttled, retry in {remaining_seconds} seconds")]
    Throttled { remaining_seconds: u64 },
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for CooldownError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Throttled { remaining_seconds: a },
                Self::Throttled { remaining_seconds: b },
            ) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Minimum-interval throttle on OTP issuance per email.
///
/// `check` and `stamp` are deliberately separate: a rejected issuance
/// (malformed input, existence check, failed dispatch) must not start the
/// cooldown, so the stamp happens only at the end of a fully successful
/// issuance.
#[async_trait]
pub trait CooldownTracker: Send + Sync {
    /// Fails `Throttled` with the ceiling-rounded remaining wait if the last
    /// stamp is younger than the cooldown interval.
    async fn check(&self, email: &Email) -> Result<(), CooldownError>;
    /// Record now as the latest issuance instant.
    async fn stamp(&self, email: &Email) -> Result<(), CooldownError>;
    /// Remove the stamp (invoked after a completed password reset).
    async fn clear(&self, email: &Email) -> Result<(), CooldownError>;
}

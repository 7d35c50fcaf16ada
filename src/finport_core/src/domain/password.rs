use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long.")]
    TooShort,
}

/// A plaintext password that met the minimum-length policy.
///
/// Only ever held transiently; stores persist an argon2 hash, never this value.
#[derive(Clone, Debug)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}

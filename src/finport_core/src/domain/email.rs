use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// Deliberately lax: non-space local part, "@", non-space domain, ".", non-space TLD.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// A syntactically valid email address.
///
/// Wrapped in [`Secret`] so addresses never leak into logs or debug output.
#[derive(Clone, Debug)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(EmailError::InvalidFormat)
        }
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

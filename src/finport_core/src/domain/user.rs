use chrono::{DateTime, Utc};
use secrecy::Secret;
use uuid::Uuid;

use crate::domain::{email::Email, password::Password};

/// A persisted user account. The password is only ever stored hashed.
#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account; the store hashes the password on insert.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: Password,
}

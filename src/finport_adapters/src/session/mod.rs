use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use finport_core::User;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub jwt_secret: Secret<String>,
    pub ttl_seconds: i64,
    pub secure_cookies: bool,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Missing token")]
    MissingToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Identity carried by a session token. No server-side state backs this;
/// signature and expiry are the whole story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: usize,
}

// Create a cookie holding a freshly signed session token
pub fn generate_session_cookie(
    user: &User,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionTokenError> {
    let token = generate_session_token(user, config)?;
    Ok(build_session_cookie(token, config))
}

// Create a signed session token for the given user
pub fn generate_session_token(
    user: &User,
    config: &SessionConfig,
) -> Result<String, SessionTokenError> {
    let delta = chrono::Duration::try_seconds(config.ttl_seconds).ok_or(
        SessionTokenError::UnexpectedError("Failed to create session duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionTokenError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    // Cast exp to a usize, which is what the claims expect
    let exp: usize = exp.try_into().map_err(|_| {
        SessionTokenError::UnexpectedError("Failed to cast i64 to usize".to_string())
    })?;

    let claims = SessionClaims {
        sub: user.id,
        email: user.email.as_ref().expose_secret().clone(),
        name: user.name.clone(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(SessionTokenError::TokenError)
}

// Check signature and expiry, returning the decoded identity
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, SessionTokenError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(SessionTokenError::TokenError)
}

pub fn create_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = build_session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}

// Cookie carrying the session token: site-wide, inaccessible to scripts,
// never sent cross-site, and HTTPS-only outside local development.
fn build_session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(config.ttl_seconds))
        .build()
}

pub mod create_user;
pub mod error;
pub mod health;
pub mod logout;
pub mod profile;
pub mod request_otp;
pub mod reset_password;
pub mod signin;
pub mod stock;
pub mod verify_auth;
pub mod verify_otp;
pub mod ws;

pub use create_user::create_user;
pub use health::{health, root};
pub use logout::logout;
pub use profile::profile;
pub use request_otp::request_otp;
pub use reset_password::reset_password;
pub use signin::signin;
pub use stock::{stock_candles, stock_price};
pub use verify_auth::verify_auth;
pub use verify_otp::verify_otp;
pub use ws::ws_handler;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Serialize;
use uuid::Uuid;

use finport_core::User;

/// Public view of a user; the password hash is never part of a response.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserBody {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.as_ref().expose_secret().clone(),
            created_at: None,
        }
    }

    pub fn from_created_user(user: &User) -> Self {
        Self {
            created_at: Some(user.created_at),
            ..Self::from_user(user)
        }
    }
}

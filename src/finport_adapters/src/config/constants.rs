pub const SESSION_COOKIE_NAME: &str = "auth_token";
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

pub const OTP_TTL_MINUTES: i64 = 10;
pub const RESEND_COOLDOWN_SECONDS: u64 = 60;

pub const SIGNIN_REDIRECT: &str = "/dashboard";

pub mod defaults {
    pub const APP_HOST: &str = "0.0.0.0";
    pub const APP_PORT: u16 = 4000;
    pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com";
        pub const SENDER: &str = "no-reply@finport.dev";
        pub const TIMEOUT_IN_MILLIS: i64 = 10_000;
    }

    pub mod finnhub {
        pub const BASE_URL: &str = "https://finnhub.io/api/v1";
    }
}

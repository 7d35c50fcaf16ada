pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    market::{Candle, Quote},
    otp::{OtpCode, OtpCodeError, OtpPurpose, OtpRecord},
    password::{Password, PasswordError},
    user::{NewUser, User},
};

pub use ports::{
    repositories::{
        CooldownError, CooldownTracker, OtpStore, OtpStoreError, UserStore, UserStoreError,
    },
    services::{EmailClient, EmailClientError, MarketDataClient, MarketDataError},
};

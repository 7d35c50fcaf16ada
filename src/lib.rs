//! # FinPort - OTP Authentication & Market Data Backend Library
//!
//! This is a facade crate that re-exports all public APIs from the FinPort backend components.
//! Use this crate to get access to the full backend functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! finport = { path = "../finport" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `OtpCode`, `User`, etc.
//! - **Repository traits**: `UserStore`, `OtpStore`, `CooldownTracker`
//! - **Use cases**: `RequestOtpUseCase`, `SignInUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `InMemoryOtpStore`, `PostmarkEmailClient`, `FinnhubClient`, etc.
//! - **Service**: `FinportService` - The main entry point for the backend

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use finport_core::*;
}

// Re-export most commonly used core types at the root level
pub use finport_core::{
    Candle, Email, EmailError, NewUser, OtpCode, OtpPurpose, OtpRecord, Password, PasswordError,
    Quote, User,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use finport_core::{
        CooldownError, CooldownTracker, OtpStore, OtpStoreError, UserStore, UserStoreError,
    };
}

// Re-export repository traits at root level
pub use finport_core::{
    CooldownError, CooldownTracker, EmailClient, EmailClientError, MarketDataClient,
    MarketDataError, OtpStore, OtpStoreError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use finport_application::*;
}

// Re-export use cases at root level
pub use finport_application::{
    CreateUserUseCase, RequestOtpUseCase, ResetPasswordUseCase, SignInUseCase, VerifyOtpUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use finport_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use finport_adapters::email::*;
    }

    /// Session token utilities
    pub mod session {
        pub use finport_adapters::session::*;
    }

    /// Market data client implementations
    pub mod market_data {
        pub use finport_adapters::market_data::*;
    }

    /// Configuration
    pub mod config {
        pub use finport_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use finport_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    market_data::FinnhubClient,
    persistence::{
        InMemoryCooldownTracker, InMemoryOtpStore, InMemoryUserStore, PostgresUserStore,
        RedisCooldownTracker, RedisOtpStore,
    },
};

// ============================================================================
// HTTP Layer & Service (Main Entry Point)
// ============================================================================

/// Axum routes, error mapping and application state
pub mod http {
    pub use finport_axum::*;
}

pub use finport_axum::AppState;

/// Main backend service
pub use finport_service::FinportService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

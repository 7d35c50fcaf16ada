use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use finport_adapters::session::SessionTokenError;
use finport_application::{
    CreateUserError, RequestOtpError, ResetPasswordError, SignInError, VerifyOtpError,
};
use finport_core::{EmailError, OtpStoreError, PasswordError, UserStoreError};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error taxonomy. Every failure a route can produce maps onto one of
/// these, and every body is `{ "error": … }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Please wait {remaining_seconds} seconds before requesting another OTP.")]
    Throttled { remaining_seconds: u64 },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    DependencyFailure(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            // Duplicate accounts answer 400 like any other bad request, not 409.
            ApiError::InvalidInput(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::DependencyFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::DependencyFailure(details) = &self {
            // Diagnostics stay in the logs; the client gets the generic text.
            tracing::error!("request failed on a dependency: {details}");
        }

        let body = match &self {
            ApiError::Throttled { remaining_seconds } => Json(serde_json::json!({
                "error": self.to_string(),
                "remainingTime": remaining_seconds,
            })),
            _ => Json(serde_json::json!({ "error": self.to_string() })),
        };

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SessionTokenError> for ApiError {
    fn from(error: SessionTokenError) -> Self {
        ApiError::DependencyFailure(error.to_string())
    }
}

impl From<RequestOtpError> for ApiError {
    fn from(error: RequestOtpError) -> Self {
        match error {
            RequestOtpError::Throttled { remaining_seconds } => {
                ApiError::Throttled { remaining_seconds }
            }
            e @ RequestOtpError::AccountAlreadyExists => ApiError::Conflict(e.to_string()),
            e @ RequestOtpError::AccountNotFound => ApiError::NotFound(e.to_string()),
            e @ RequestOtpError::Dispatch(_) => ApiError::DependencyFailure(e.to_string()),
            e => ApiError::DependencyFailure(e.to_string()),
        }
    }
}

fn from_otp_store_error(error: OtpStoreError) -> ApiError {
    match error {
        OtpStoreError::NotFound => ApiError::InvalidInput(
            "No OTP found for this email. Please request a new one.".to_string(),
        ),
        OtpStoreError::Expired => {
            ApiError::InvalidInput("OTP has expired. Please request a new one.".to_string())
        }
        OtpStoreError::Mismatch => {
            ApiError::InvalidInput("Invalid OTP. Please try again.".to_string())
        }
        OtpStoreError::UnexpectedError(details) => ApiError::DependencyFailure(details),
    }
}

impl From<VerifyOtpError> for ApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::OtpStoreError(e) => from_otp_store_error(e),
        }
    }
}

impl From<CreateUserError> for ApiError {
    fn from(error: CreateUserError) -> Self {
        match error {
            e @ CreateUserError::EmailNotVerified => ApiError::InvalidInput(e.to_string()),
            CreateUserError::UserStoreError(UserStoreError::UserAlreadyExists) => {
                ApiError::Conflict("User with this email already exists.".to_string())
            }
            CreateUserError::UserStoreError(e) => ApiError::DependencyFailure(e.to_string()),
            CreateUserError::OtpStoreError(e) => ApiError::DependencyFailure(e.to_string()),
        }
    }
}

impl From<SignInError> for ApiError {
    fn from(error: SignInError) -> Self {
        match error {
            e @ SignInError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            SignInError::UnexpectedError(details) => ApiError::DependencyFailure(details),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            e @ ResetPasswordError::WrongPurpose => ApiError::InvalidInput(e.to_string()),
            ResetPasswordError::OtpStoreError(e) => from_otp_store_error(e),
            ResetPasswordError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::NotFound("User not found.".to_string())
            }
            ResetPasswordError::UserStoreError(e) => ApiError::DependencyFailure(e.to_string()),
        }
    }
}

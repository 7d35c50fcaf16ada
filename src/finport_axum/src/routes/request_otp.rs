use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use finport_adapters::config::RESEND_COOLDOWN_SECONDS;
use finport_application::RequestOtpUseCase;
use finport_core::{Email, OtpPurpose};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub email: Option<Secret<String>>,
    #[serde(rename = "isSignup", default = "default_is_signup")]
    pub is_signup: bool,
}

fn default_is_signup() -> bool {
    true
}

#[derive(Serialize)]
pub struct RequestOtpResponse {
    pub message: String,
    #[serde(rename = "canResendAfter")]
    pub can_resend_after: u64,
}

#[tracing::instrument(name = "Request OTP", skip_all)]
pub async fn request_otp(
    State(state): State<AppState>,
    Json(request): Json<RequestOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = request
        .email
        .filter(|email| !email.expose_secret().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Email is required.".to_string()))?;
    let email = Email::try_from(email)?;

    let purpose = if request.is_signup {
        OtpPurpose::Signup
    } else {
        OtpPurpose::PasswordReset
    };

    let use_case = RequestOtpUseCase::new(
        &*state.otp_store,
        &*state.cooldown,
        &*state.user_store,
        &*state.email_client,
    );
    use_case.execute(email, purpose).await?;

    Ok(Json(RequestOtpResponse {
        message: "OTP sent to email successfully.".to_string(),
        can_resend_after: RESEND_COOLDOWN_SECONDS,
    }))
}

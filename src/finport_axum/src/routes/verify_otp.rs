use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use finport_application::VerifyOtpUseCase;
use finport_core::{Email, OtpCode};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<Secret<String>>,
    pub otp: Option<String>,
}

#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = request
        .email
        .filter(|email| !email.expose_secret().is_empty());
    let otp = request.otp.filter(|otp| !otp.is_empty());
    let (Some(email), Some(otp)) = (email, otp) else {
        return Err(ApiError::InvalidInput(
            "Email and OTP are required.".to_string(),
        ));
    };

    let email = Email::try_from(email)?;
    // A code that is not even 6 digits can never match a stored one.
    let code = OtpCode::parse(otp)
        .map_err(|_| ApiError::InvalidInput("Invalid OTP. Please try again.".to_string()))?;

    let use_case = VerifyOtpUseCase::new(&*state.otp_store);
    use_case.execute(email, code).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "OTP verified successfully."
    })))
}

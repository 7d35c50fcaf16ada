use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use finport_application::ResetPasswordUseCase;
use finport_core::{Email, OtpCode, Password};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<Secret<String>>,
    pub otp: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = request
        .email
        .filter(|email| !email.expose_secret().is_empty());
    let otp = request.otp.filter(|otp| !otp.is_empty());
    let new_password = request
        .new_password
        .filter(|password| !password.expose_secret().is_empty());
    let (Some(email), Some(otp), Some(new_password)) = (email, otp, new_password) else {
        return Err(ApiError::InvalidInput(
            "Email, OTP, and new password are required.".to_string(),
        ));
    };

    let email = Email::try_from(email)?;
    let code = OtpCode::parse(otp)
        .map_err(|_| ApiError::InvalidInput("Invalid OTP. Please try again.".to_string()))?;
    let new_password = Password::try_from(new_password)?;

    let use_case =
        ResetPasswordUseCase::new(&*state.otp_store, &*state.user_store, &*state.cooldown);
    use_case.execute(email, code, new_password).await?;

    Ok(Json(serde_json::json!({
        "message": "Password reset successfully. You can now sign in with your new password."
    })))
}

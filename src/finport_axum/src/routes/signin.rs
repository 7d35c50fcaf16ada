use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use finport_adapters::config::SIGNIN_REDIRECT;
use finport_adapters::session::generate_session_cookie;
use finport_application::SignInUseCase;
use finport_core::{Email, Password};

use super::UserBody;
use super::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub message: String,
    pub user: UserBody,
    #[serde(rename = "redirectTo")]
    pub redirect_to: String,
}

#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = request
        .email
        .filter(|email| !email.expose_secret().is_empty());
    let password = request
        .password
        .filter(|password| !password.expose_secret().is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::InvalidInput(
            "Email and password are required.".to_string(),
        ));
    };

    // Parse failures collapse into the generic credential error; no stored
    // account can have a malformed email or an under-length password anyway.
    let invalid_credentials = || ApiError::Unauthorized("Invalid email or password.".to_string());
    let email = Email::try_from(email).map_err(|_| invalid_credentials())?;
    let password = Password::try_from(password).map_err(|_| invalid_credentials())?;

    let use_case = SignInUseCase::new(&*state.user_store);
    let user = use_case.execute(email, password).await?;

    let session_cookie = generate_session_cookie(&user, &state.session_config)?;

    Ok((
        jar.add(session_cookie),
        Json(SignInResponse {
            message: "Sign-in successful.".to_string(),
            user: UserBody::from_user(&user),
            redirect_to: SIGNIN_REDIRECT.to_string(),
        }),
    ))
}

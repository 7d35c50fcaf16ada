use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use finport_application::CreateUserUseCase;
use finport_core::{Email, Password};

use super::UserBody;
use super::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user: UserBody,
}

#[tracing::instrument(name = "Create user", skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = request.name.filter(|name| !name.trim().is_empty());
    let email = request
        .email
        .filter(|email| !email.expose_secret().is_empty());
    let password = request
        .password
        .filter(|password| !password.expose_secret().is_empty());
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(ApiError::InvalidInput(
            "Name, email, and password are required.".to_string(),
        ));
    };

    let email = Email::try_from(email)?;
    let password = Password::try_from(password)?;

    let use_case = CreateUserUseCase::new(&*state.otp_store, &*state.user_store);
    let user = use_case.execute(name, email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully.".to_string(),
            user: UserBody::from_created_user(&user),
        }),
    ))
}

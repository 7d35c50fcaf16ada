use axum::{Json, extract::State, http::StatusCode, response::IntoResponse, response::Response};
use axum_extra::extract::CookieJar;

use finport_adapters::session::{create_removal_cookie, validate_session_token};

use crate::state::AppState;

/// "Whoami" check used by the frontend on page load.
#[tracing::instrument(name = "Verify auth", skip_all)]
pub async fn verify_auth(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(cookie) = jar.get(&state.session_config.cookie_name) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "No authentication token found" })),
        )
            .into_response();
    };

    match validate_session_token(cookie.value(), &state.session_config) {
        Ok(claims) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "authenticated": true,
                "user": {
                    "id": claims.sub,
                    "name": claims.name,
                    "email": claims.email,
                }
            })),
        )
            .into_response(),
        Err(_) => {
            // A stale or tampered credential gets cleared on the way out.
            let jar = jar.add(create_removal_cookie(&state.session_config));
            (
                StatusCode::UNAUTHORIZED,
                jar,
                Json(serde_json::json!({ "error": "Invalid or expired token" })),
            )
                .into_response()
        }
    }
}

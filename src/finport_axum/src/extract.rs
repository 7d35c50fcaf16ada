use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use finport_adapters::session::{SessionClaims, create_removal_cookie, validate_session_token};

use crate::state::AppState;

/// Session-validation middleware in extractor form: pulls the session cookie,
/// verifies signature and expiry, and hands the decoded identity to the
/// handler. Handlers taking this parameter are protected routes.
pub struct AuthenticatedUser(pub SessionClaims);

pub struct AuthRejection {
    message: &'static str,
    // Serialized removal cookie; set when an invalid credential should be
    // cleared from the client.
    removal_cookie: Option<String>,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        match self.removal_cookie {
            Some(cookie) => {
                (StatusCode::UNAUTHORIZED, [(header::SET_COOKIE, cookie)], body).into_response()
            }
            None => (StatusCode::UNAUTHORIZED, body).into_response(),
        }
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(&state.session_config.cookie_name) else {
            return Err(AuthRejection {
                message: "Access denied. No token provided.",
                removal_cookie: None,
            });
        };

        match validate_session_token(cookie.value(), &state.session_config) {
            Ok(claims) => Ok(Self(claims)),
            Err(_) => Err(AuthRejection {
                message: "Invalid token",
                removal_cookie: Some(create_removal_cookie(&state.session_config).to_string()),
            }),
        }
    }
}

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use finport_adapters::session::create_removal_cookie;

use crate::state::AppState;

/// Sessions are stateless, so logout is purely client-side: the token stays
/// cryptographically valid until its natural expiry, the cookie just goes.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(create_removal_cookie(&state.session_config));

    (
        jar,
        Json(serde_json::json!({ "message": "Logged out successfully" })),
    )
}

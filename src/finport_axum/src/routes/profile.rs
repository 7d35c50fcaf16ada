use axum::{Json, response::IntoResponse};

use crate::extract::AuthenticatedUser;

/// Example protected route; the extractor has already validated the session.
#[tracing::instrument(name = "Profile", skip_all)]
pub async fn profile(AuthenticatedUser(claims): AuthenticatedUser) -> impl IntoResponse {
    Json(serde_json::json!({
        "user": {
            "id": claims.sub,
            "name": claims.name,
            "email": claims.email,
        }
    }))
}

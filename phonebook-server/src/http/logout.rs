use crate::http::middleware::authentication::SESSION_COOKIE;
use crate::http::state::AppState;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

pub(crate) async fn logout(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> impl IntoResponse {
    state.sessions.remove(&principal.token);

    (
        [(SET_COOKIE, format!("{SESSION_COOKIE}=; Path=/; Max-Age=0"))],
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

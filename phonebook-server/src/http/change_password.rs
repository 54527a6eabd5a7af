use crate::accounts::UserAccounts;
use crate::http::extract::JsonBody;
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::owner::Owner;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub(crate) struct ChangePassword {
    #[serde(default)]
    current_password: String,
    #[serde(default)]
    new_password: String,
}

pub(crate) async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(payload): JsonBody<ChangePassword>,
) -> Result<Json<Value>, Failure> {
    let Owner::User(username) = &principal.owner else {
        return Err(Failure::new(
            StatusCode::FORBIDDEN,
            "Only user accounts can change their password here",
        ));
    };

    UserAccounts::new(state.layout.clone()).change_password(
        username,
        &payload.current_password,
        &payload.new_password,
    )?;

    // Log out
    state.sessions.remove_owner(&principal.owner);

    Ok(Json(json!({ "success": true, "message": "Password changed successfully" })))
}

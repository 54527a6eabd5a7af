use crate::accounts::UserAccounts;
use crate::http::extract::{JsonBody, QueryParams};
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::owner::Owner;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub(crate) struct UsernameQuery {
    #[serde(default)]
    username: String,
}

#[derive(Deserialize)]
pub(crate) struct SecurityAnswer {
    #[serde(default)]
    username: String,
    #[serde(default)]
    answer: String,
}

#[derive(Deserialize)]
pub(crate) struct ResetPassword {
    #[serde(default)]
    username: String,
    #[serde(default)]
    security_answer: String,
    #[serde(default)]
    new_password: String,
}

pub(crate) async fn security_question(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UsernameQuery>,
) -> Result<Json<Value>, Failure> {
    let question = UserAccounts::new(state.layout.clone()).security_question(&query.username)?;

    Ok(Json(json!({ "success": true, "security_question": question })))
}

pub(crate) async fn verify_security_answer(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SecurityAnswer>,
) -> Result<Json<Value>, Failure> {
    UserAccounts::new(state.layout.clone())
        .verify_security_answer(&payload.username, &payload.answer)?;

    Ok(Json(json!({ "success": true, "message": "Verification successful" })))
}

/// Resetting a password also ends every session of that user
pub(crate) async fn reset_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResetPassword>,
) -> Result<Json<Value>, Failure> {
    UserAccounts::new(state.layout.clone()).reset_password(
        &payload.username,
        &payload.security_answer,
        &payload.new_password,
    )?;
    state.sessions.remove_owner(&Owner::User(payload.username));

    Ok(Json(json!({ "success": true, "message": "Password reset successful" })))
}

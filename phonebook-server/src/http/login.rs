use crate::accounts::{AdminAccounts, UserAccounts};
use crate::http::extract::JsonBody;
use crate::http::failure::Failure;
use crate::http::middleware::authentication::SESSION_COOKIE;
use crate::http::state::AppState;
use crate::models::account::{AdminProfile, UserProfile};
use crate::models::owner::Owner;
use crate::models::transient::principal::Principal;
use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub(crate) struct Login {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Returns the token in the body and as a cookie for the HTML pages
fn session_response(principal: &Principal, body: Value) -> Response {
    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        principal.token
    );
    ([(SET_COOKIE, cookie)], Json(body)).into_response()
}

pub(crate) async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Login>,
) -> Result<Response, Failure> {
    let account =
        UserAccounts::new(state.layout.clone()).login(&payload.username, &payload.password)?;
    let principal = state.sessions.create(Owner::User(account.username.clone()));

    info!(
        "{} logged in, {} sessions open",
        account.username,
        state.sessions.len()
    );
    Ok(session_response(
        &principal,
        json!({
            "success": true,
            "message": "Login successful",
            "token": principal.token,
            "user": UserProfile::from(&account),
        }),
    ))
}

pub(crate) async fn admin_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Login>,
) -> Result<Response, Failure> {
    let admin =
        AdminAccounts::new(state.layout.clone()).login(&payload.username, &payload.password)?;
    let principal = state.sessions.create(Owner::Admin(admin.username.clone()));

    info!(
        "Admin {} logged in, {} sessions open",
        admin.username,
        state.sessions.len()
    );
    Ok(session_response(
        &principal,
        json!({
            "success": true,
            "message": "Login successful",
            "token": principal.token,
            "admin": AdminProfile::from(&admin),
        }),
    ))
}

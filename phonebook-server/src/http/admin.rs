use crate::accounts::{AdminAccounts, UserDirectory};
use crate::http::extract::{JsonBody, PathParam, QueryParams};
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::account::{AdminProfile, NewAdmin};
use crate::models::owner::Owner;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::{Extension, Json};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub(crate) struct UserQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
pub(crate) struct NewPassword {
    #[serde(default)]
    new_password: String,
}

pub(crate) async fn users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UserQuery>,
) -> Result<Json<Value>, Failure> {
    let users = UserDirectory::new(state.layout.clone()).search_users(&query.q)?;

    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "users": users,
    })))
}

pub(crate) async fn user(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
) -> Result<Json<Value>, Failure> {
    let user = UserDirectory::new(state.layout.clone()).get_user(&username)?;
    Ok(Json(json!({ "success": true, "user": user })))
}

pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(username): PathParam<String>,
) -> Result<Json<Value>, Failure> {
    UserDirectory::new(state.layout.clone()).delete_user(&username)?;
    state.sessions.remove_owner(&Owner::User(username.clone()));

    info!(
        "{} deleted the account of {username}",
        principal.owner.username()
    );
    Ok(Json(json!({ "success": true, "message": "User deleted" })))
}

pub(crate) async fn update_user_password(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
    JsonBody(payload): JsonBody<NewPassword>,
) -> Result<Json<Value>, Failure> {
    UserDirectory::new(state.layout.clone())
        .update_user_password(&username, &payload.new_password)?;
    state.sessions.remove_owner(&Owner::User(username));

    Ok(Json(json!({ "success": true, "message": "Password updated" })))
}

pub(crate) async fn stats(State(state): State<AppState>) -> Result<Json<Value>, Failure> {
    let stats = UserDirectory::new(state.layout.clone()).system_stats()?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

pub(crate) async fn admins(State(state): State<AppState>) -> Result<Json<Value>, Failure> {
    let admins: Vec<AdminProfile> = AdminAccounts::new(state.layout.clone())
        .list()?
        .iter()
        .map(AdminProfile::from)
        .collect();

    Ok(Json(json!({ "success": true, "admins": admins })))
}

/// Only an existing admin can add another one
pub(crate) async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewAdmin>,
) -> Result<Json<Value>, Failure> {
    let admin = AdminAccounts::new(state.layout.clone()).register(&payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Admin registered",
        "admin": AdminProfile::from(&admin),
    })))
}

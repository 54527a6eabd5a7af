use crate::accounts::{AdminAccounts, UserAccounts};
use crate::http::extract::JsonBody;
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::account::{AdminProfile, ProfileUpdate};
use crate::models::owner::Owner;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{Value, json};

pub(crate) async fn profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    match &principal.owner {
        Owner::User(username) => {
            let profile = UserAccounts::new(state.layout.clone()).profile(username)?;
            Ok(Json(json!({ "success": true, "profile": profile })))
        }
        Owner::Admin(username) => {
            let admin = AdminAccounts::new(state.layout.clone()).get(username)?;
            Ok(Json(
                json!({ "success": true, "profile": AdminProfile::from(&admin) }),
            ))
        }
    }
}

pub(crate) async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(payload): JsonBody<ProfileUpdate>,
) -> Result<Json<Value>, Failure> {
    let Owner::User(username) = &principal.owner else {
        return Err(Failure::new(
            StatusCode::FORBIDDEN,
            "Admin profiles can't be edited",
        ));
    };

    let profile = UserAccounts::new(state.layout.clone()).update_profile(username, &payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Update successful",
        "profile": profile,
    })))
}

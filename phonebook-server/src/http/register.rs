use crate::accounts::UserAccounts;
use crate::http::extract::JsonBody;
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::account::{NewUser, UserProfile};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

pub(crate) async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewUser>,
) -> Result<Json<Value>, Failure> {
    let account = UserAccounts::new(state.layout.clone()).register(&payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration successful",
        "user": UserProfile::from(&account),
    })))
}

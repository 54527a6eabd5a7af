use crate::groups::{GroupManager, GroupSortField};
use crate::http::extract::{JsonBody, PathParam, QueryParams};
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::group::GroupInput;
use crate::models::sort_order::SortOrder;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::{Extension, Json};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub(crate) struct GroupQuery {
    #[serde(default)]
    q: String,
    sort: Option<String>,
    #[serde(default)]
    order: String,
}

fn group_manager(state: &AppState, principal: &Principal) -> GroupManager {
    GroupManager::new(&state.layout, principal.owner.group_scope())
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    QueryParams(query): QueryParams<GroupQuery>,
) -> Result<Json<Value>, Failure> {
    let mut groups = group_manager(&state, &principal).search(&query.q)?;

    if let Some(sort) = &query.sort {
        groups = GroupManager::sort_list(
            groups,
            GroupSortField::from_name(sort),
            SortOrder::from_name(&query.order),
        );
    }

    Ok(Json(json!({
        "success": true,
        "count": groups.len(),
        "groups": groups,
    })))
}

pub(crate) async fn add(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(payload): JsonBody<GroupInput>,
) -> Result<Json<Value>, Failure> {
    let group = group_manager(&state, &principal).add(&payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Group added",
        "group": group,
    })))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<Value>, Failure> {
    let group = group_manager(&state, &principal).get(id)?;
    Ok(Json(json!({ "success": true, "group": group })))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
    JsonBody(payload): JsonBody<GroupInput>,
) -> Result<Json<Value>, Failure> {
    let group = group_manager(&state, &principal).update(id, &payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Group updated",
        "group": group,
    })))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<Value>, Failure> {
    let group = group_manager(&state, &principal).delete(id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Group deleted",
        "group": group,
    })))
}

pub(crate) async fn delete_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let deleted = group_manager(&state, &principal).delete_all()?;

    info!("{} deleted {deleted} groups", principal.owner.username());
    Ok(Json(json!({
        "success": true,
        "message": "All groups deleted",
        "deleted": deleted,
    })))
}

pub(crate) async fn names(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let names = group_manager(&state, &principal).names()?;
    Ok(Json(json!({ "success": true, "groups": names })))
}

pub(crate) async fn stats(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let stats = group_manager(&state, &principal).statistics()?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

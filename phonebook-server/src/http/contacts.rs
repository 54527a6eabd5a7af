use crate::contacts::{ContactList, SearchField, SortField};
use crate::http::extract::{JsonBody, PathParam, QueryParams};
use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::contact::{ContactInput, ContactPatch};
use crate::models::sort_order::SortOrder;
use crate::models::transient::principal::Principal;
use axum::extract::State;
use axum::{Extension, Json};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashSet;

#[derive(Deserialize)]
pub(crate) struct ContactQuery {
    #[serde(default)]
    q: String,
    /// Comma separated search fields
    #[serde(default)]
    fields: String,
    group: Option<String>,
    sort: Option<String>,
    #[serde(default)]
    order: String,
}

#[derive(Deserialize)]
pub(crate) struct SortRequest {
    #[serde(default)]
    field: String,
    #[serde(default)]
    reverse: bool,
    order: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct GroupAssignment {
    #[serde(default)]
    group: String,
}

fn contact_list(state: &AppState, principal: &Principal) -> ContactList {
    ContactList::new(&state.layout, &principal.owner)
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    QueryParams(query): QueryParams<ContactQuery>,
) -> Result<Json<Value>, Failure> {
    let mut list = contact_list(&state, &principal);
    let mut contacts = list.search(&query.q, &SearchField::parse_list(&query.fields))?;

    if let Some(group) = &query.group {
        let members: HashSet<u64> = list
            .filter_by_group(group)?
            .iter()
            .map(|contact| contact.id)
            .collect();
        contacts.retain(|contact| members.contains(&contact.id));
    }

    if let Some(sort) = &query.sort {
        contacts = ContactList::sort_list(
            contacts,
            SortField::from_name(sort),
            SortOrder::from_name(&query.order),
        );
    }

    Ok(Json(json!({
        "success": true,
        "count": contacts.len(),
        "contacts": contacts,
    })))
}

pub(crate) async fn add(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(payload): JsonBody<ContactInput>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).add(&payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contact added",
        "contact": contact,
    })))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).get(id)?;
    Ok(Json(json!({ "success": true, "contact": contact })))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
    JsonBody(payload): JsonBody<ContactInput>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).update(id, &payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contact updated",
        "contact": contact,
    })))
}

pub(crate) async fn update_partial(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
    JsonBody(payload): JsonBody<ContactPatch>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).update_partial(id, &payload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contact updated",
        "contact": contact,
    })))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).delete(id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contact deleted",
        "contact": contact,
    })))
}

pub(crate) async fn delete_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let deleted = contact_list(&state, &principal).delete_all()?;

    info!(
        "{} deleted all {deleted} of their contacts",
        principal.owner.username()
    );
    Ok(Json(json!({
        "success": true,
        "message": "All contacts deleted",
        "deleted": deleted,
    })))
}

pub(crate) async fn assign_group(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    PathParam(id): PathParam<u64>,
    JsonBody(payload): JsonBody<GroupAssignment>,
) -> Result<Json<Value>, Failure> {
    let contact = contact_list(&state, &principal).assign_to_group(id, &payload.group)?;

    Ok(Json(json!({
        "success": true,
        "message": "Group updated",
        "contact": contact,
    })))
}

/// Sorts the stored list itself, not just the response
pub(crate) async fn sort(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(payload): JsonBody<SortRequest>,
) -> Result<Json<Value>, Failure> {
    let order = match &payload.order {
        Some(order) => SortOrder::from_name(order),
        None => SortOrder::from_reverse(payload.reverse),
    };
    let contacts = contact_list(&state, &principal)
        .sort_and_save(SortField::from_name(&payload.field), order)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contacts sorted",
        "contacts": contacts,
    })))
}

pub(crate) async fn groups(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let groups = contact_list(&state, &principal).get_groups()?;
    Ok(Json(json!({ "success": true, "groups": groups })))
}

pub(crate) async fn stats(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, Failure> {
    let stats = contact_list(&state, &principal).statistics()?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

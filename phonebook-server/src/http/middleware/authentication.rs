use crate::http::failure::Failure;
use crate::http::state::AppState;
use crate::models::transient::principal::Principal;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::middleware::Next;
use axum::response::Response;

pub const SESSION_COOKIE: &str = "session";

/// Bearer token from `Authorization`, or the session cookie set at login
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(authorization) = headers.get(AUTHORIZATION) {
        return authorization
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(|token| token.trim().to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie| cookie.to_str().ok())
        .flat_map(|cookie| cookie.split(';'))
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(String::from)
}

/// Resolves the session of a request, without rejecting it
pub fn principal(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    session_token(headers).and_then(|token| state.sessions.get(&token))
}

/// Rejects requests without a live session, hands the [`Principal`] to handlers
pub async fn authentication(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Failure> {
    let principal = principal(&state, request.headers()).ok_or_else(Failure::not_logged_in)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Runs after [`authentication`], lets only admin sessions through
pub async fn admin_only(request: Request, next: Next) -> Result<Response, Failure> {
    let is_admin = request
        .extensions()
        .get::<Principal>()
        .ok_or_else(Failure::not_logged_in)?
        .is_admin();

    if !is_admin {
        return Err(Failure::forbidden());
    }

    Ok(next.run(request).await)
}

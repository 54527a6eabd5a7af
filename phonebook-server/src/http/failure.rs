use crate::errors::account_error::AccountError;
use crate::errors::contact_error::ContactError;
use crate::errors::group_error::GroupError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;
use std::fmt::Display;

/// Error envelope: `{"success": false, "message": ...}` with a matching status
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Failure {
            status,
            message: message.into(),
        }
    }

    pub fn not_logged_in() -> Self {
        Failure::new(StatusCode::UNAUTHORIZED, "User not logged in")
    }

    pub fn forbidden() -> Self {
        Failure::new(StatusCode::FORBIDDEN, "Access denied")
    }

    fn internal(error: impl Display) -> Self {
        error!("{error}");
        Failure::new(StatusCode::INTERNAL_SERVER_ERROR, "Error saving file")
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}

impl From<AccountError> for Failure {
    fn from(error: AccountError) -> Self {
        let status = match error {
            AccountError::Store(_) | AccountError::Hashing => return Failure::internal(error),
            AccountError::UnknownUser => StatusCode::NOT_FOUND,
            AccountError::WrongPassword | AccountError::WrongSecurityAnswer => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::UsernameTaken => StatusCode::CONFLICT,
            AccountError::ProtectedAccount => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        };
        Failure::new(status, error.to_string())
    }
}

impl From<ContactError> for Failure {
    fn from(error: ContactError) -> Self {
        let status = match error {
            ContactError::Store(_) => return Failure::internal(error),
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::DuplicatePhone => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        Failure::new(status, error.to_string())
    }
}

impl From<GroupError> for Failure {
    fn from(error: GroupError) -> Self {
        let status = match error {
            GroupError::Store(_) => return Failure::internal(error),
            GroupError::NotFound => StatusCode::NOT_FOUND,
            GroupError::DuplicateName => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        Failure::new(status, error.to_string())
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        Failure::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for Failure {
    fn from(rejection: PathRejection) -> Self {
        Failure::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        Failure::new(rejection.status(), rejection.body_text())
    }
}

use crate::errors::store_error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Field name is required")]
    MissingName,
    #[error("Group name must be at least 2 characters")]
    NameTooShort,
    #[error("Group name cannot exceed 50 characters")]
    NameTooLong,
    #[error("is_shared must be 0 or 1")]
    InvalidShared,
    #[error("Group name already exists")]
    DuplicateName,
    #[error("Group not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

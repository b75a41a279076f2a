//! Auth service errors.

use thiserror::Error;

use crate::domain::users::UsersServiceError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    AlreadyExists,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("user storage error")]
    Users(#[source] UsersServiceError),
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::AlreadyExists,
            UsersServiceError::MissingRequiredData => Self::MissingRequiredData,
            UsersServiceError::InvalidData => Self::InvalidData,
            UsersServiceError::NotFound | UsersServiceError::Sql(_) => Self::Users(error),
        }
    }
}

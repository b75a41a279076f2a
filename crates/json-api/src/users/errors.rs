//! User Errors

use salvo::http::StatusError;
use tracing::error;

use gazalla_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("User with this email already exists")
        }
        UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Email and password are required")
        }
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
    }
}

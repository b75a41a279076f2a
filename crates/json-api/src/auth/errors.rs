//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use gazalla_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("User with this email already exists")
        }
        AuthServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Email and password are required")
        }
        AuthServiceError::InvalidData => StatusError::bad_request().brief("Invalid email address"),
        AuthServiceError::Users(source) => {
            error!("user lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

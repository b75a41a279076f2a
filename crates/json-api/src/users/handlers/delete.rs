//! Delete User Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{MessageResponse, extensions::*, users::into_status_error};

/// Delete User Handler
#[endpoint(
    tags("users"),
    summary = "Delete User",
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .users
        .delete_user(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use gazalla_app::domain::users::{UsersServiceError, models::UserUuid};
    use salvo::test::TestClient;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("users/{user}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let uuid = UserUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .withf(move |user| *user == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/users/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_delete_missing_user_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/users/{}", UserUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}

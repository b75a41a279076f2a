//! Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gazalla_app::auth::Credentials;

use crate::{
    auth::into_status_error,
    extensions::*,
    observability::{ShopEvent, record_shop_event},
    users::UserEnvelope,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
///
/// Checks an email and password and returns the matching account.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Login successful"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let LoginRequest { email, password } = json.into_inner();

    let user = match state.app.auth.login(Credentials { email, password }).await {
        Ok(user) => user,
        Err(error) => {
            record_shop_event(ShopEvent::LoginRejected);

            return Err(into_status_error(error));
        }
    };

    record_shop_event(ShopEvent::Login);

    info!(user = %user.uuid, role = %user.role, "user logged in");

    Ok(Json(UserEnvelope {
        user: user.into(),
        message: "Login successful".to_string(),
    }))
}

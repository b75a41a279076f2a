//! Signup Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gazalla_app::auth::Signup;

use crate::{
    auth::into_status_error,
    extensions::*,
    observability::{ShopEvent, record_shop_event},
    users::UserEnvelope,
};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// Grants the admin role when it matches the server's signup key
    #[serde(default)]
    pub admin_key: Option<String>,
}

impl From<SignupRequest> for Signup {
    fn from(request: SignupRequest) -> Self {
        Signup {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            admin_key: request.admin_key,
        }
    }
}

/// Signup Handler
///
/// Registers a new account.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Registration successful"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, StatusError> {
    let state = depot.state_or_500()?;

    let user = state
        .app
        .auth
        .signup(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_shop_event(ShopEvent::Signup);

    info!(user = %user.uuid, role = %user.role, "user registered");

    res.status_code(StatusCode::CREATED);

    Ok(Json(UserEnvelope {
        user: user.into(),
        message: "Registration successful".to_string(),
    }))
}

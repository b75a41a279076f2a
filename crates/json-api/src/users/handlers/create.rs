//! Create User Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use gazalla_app::{
    auth::digest_password,
    domain::users::{
        data::NewUser,
        models::{Role, UserUuid},
    },
};

use crate::{
    extensions::*,
    users::{UserEnvelope, into_status_error},
};

/// Create User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,

    /// `admin` or `customer`, `customer` when omitted
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateUserRequest {
    fn into_new_user(self) -> Result<NewUser, StatusError> {
        let role = self
            .role
            .map(|role| role.parse::<Role>())
            .transpose()
            .or_400("\"role\" must be \"admin\" or \"customer\"")?
            .unwrap_or_default();

        if self.password.is_empty() {
            return Err(StatusError::bad_request().brief("Email and password are required"));
        }

        let uuid = UserUuid::new();

        Ok(NewUser {
            uuid,
            name: self.name,
            email: self.email,
            password_digest: digest_password(uuid, &self.password),
            role,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let new_user = json.into_inner().into_new_user()?;

    let user = state
        .app
        .users
        .create_user(new_user)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(UserEnvelope {
        user: user.into(),
        message: "User created successfully".to_string(),
    }))
}

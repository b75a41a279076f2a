//! User Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gazalla_app::domain::users::models::User;

/// User as returned by the API. The password digest is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// `admin` or `customer`
    pub role: String,

    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// A single user with a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub user: UserResponse,
    pub message: String,
}

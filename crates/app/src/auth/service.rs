//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{AuthServiceError, Credentials, Signup, digest_password, verify_password},
    domain::users::{
        UsersService,
        data::NewUser,
        models::{Role, User, UserUuid},
    },
};

/// Signup key used when none is configured.
pub const DEFAULT_ADMIN_SIGNUP_KEY: &str = "GAZALLA_ADMIN_2025";

/// Authenticates against whichever users backend it is given.
#[derive(Clone)]
pub struct UsersAuthService {
    users: Arc<dyn UsersService>,
    admin_key: String,
}

impl UsersAuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersService>, admin_key: impl Into<String>) -> Self {
        Self {
            users,
            admin_key: admin_key.into(),
        }
    }

    fn role_for(&self, admin_key: Option<&str>) -> Role {
        match admin_key {
            Some(key) if !self.admin_key.is_empty() && key == self.admin_key => Role::Admin,
            _ => Role::Customer,
        }
    }
}

#[async_trait]
impl AuthService for UsersAuthService {
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError> {
        let Some(user) = self.users.find_user_by_email(credentials.email).await? else {
            debug!("login for unknown email");
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(user.uuid, &credentials.password, &user.password_digest) {
            debug!(user = %user.uuid, "login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn signup(&self, signup: Signup) -> Result<User, AuthServiceError> {
        if signup.email.trim().is_empty() || signup.password.is_empty() {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let uuid = UserUuid::new();
        let role = self.role_for(signup.admin_key.as_deref());

        let user = self
            .users
            .create_user(NewUser {
                uuid,
                name: signup.display_name(),
                email: signup.email,
                password_digest: digest_password(uuid, &signup.password),
                role,
            })
            .await?;

        info!(user = %user.uuid, role = %user.role, "account created");

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Returns the user whose email and password match.
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError>;

    /// Registers a new account.
    async fn signup(&self, signup: Signup) -> Result<User, AuthServiceError>;
}

//! In-memory users store

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::users::{
    UsersService,
    data::{NewUser, normalize_email},
    errors::UsersServiceError,
    models::{User, UserUuid},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryUsersService {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUsersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersService for MemoryUsersService {
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        self.users
            .read()
            .await
            .iter()
            .find(|candidate| candidate.uuid == user)
            .cloned()
            .ok_or(UsersServiceError::NotFound)
    }

    async fn find_user_by_email(&self, email: String) -> Result<Option<User>, UsersServiceError> {
        let email = normalize_email(&email);

        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|candidate| candidate.email == email)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let user = user.normalized();
        user.validate()?;

        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|existing| existing.uuid == user.uuid || existing.email == user.email)
        {
            return Err(UsersServiceError::AlreadyExists);
        }

        let created = User {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            password_digest: user.password_digest,
            role: user.role,
            created_at: Timestamp::now(),
        };

        users.push(created.clone());

        Ok(created)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut users = self.users.write().await;
        let before = users.len();

        users.retain(|candidate| candidate.uuid != user);

        if users.len() == before {
            return Err(UsersServiceError::NotFound);
        }

        Ok(())
    }
}

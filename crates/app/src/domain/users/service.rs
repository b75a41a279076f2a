//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, normalize_email},
        errors::UsersServiceError,
        models::{User, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: String) -> Result<Option<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_email(&mut tx, &normalize_email(&email))
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let user = user.normalized();
        user.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Lists every user, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Looks a user up by email, ignoring case and surrounding whitespace.
    async fn find_user_by_email(&self, email: String) -> Result<Option<User>, UsersServiceError>;

    /// Creates a user. Emails are unique regardless of case.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Deletes a user with the given UUID.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

//! User data

use crate::domain::users::{
    errors::UsersServiceError,
    models::{Role, UserUuid},
};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
}

impl NewUser {
    /// Trims the name and email and lowercases the email.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UsersServiceError> {
        if self.email.is_empty() || self.password_digest.is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        if !self.email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        Ok(())
    }
}

/// Canonical form used for storing and looking up emails.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            name: " Grace Hopper ".to_string(),
            email: email.to_string(),
            password_digest: "digest".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn normalized_trims_and_lowercases() {
        let normalized = user("  Grace@Example.COM ").normalized();

        assert_eq!(normalized.email, "grace@example.com");
        assert_eq!(normalized.name, "Grace Hopper");
    }

    #[test]
    fn validate_requires_an_address() {
        assert!(matches!(
            user("").validate(),
            Err(UsersServiceError::MissingRequiredData)
        ));
        assert!(matches!(
            user("not-an-email").validate(),
            Err(UsersServiceError::InvalidData)
        ));
        assert!(user("grace@example.com").validate().is_ok());
    }
}

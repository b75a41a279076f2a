//! Auth request models.

/// Email and password presented at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account registration details.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// Grants the admin role when it matches the configured signup key.
    pub admin_key: Option<String>,
}

impl Signup {
    /// Display name built from the first and last names.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

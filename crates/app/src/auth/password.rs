//! Password digests.

use sha2::{Digest, Sha256};

use crate::domain::users::models::UserUuid;

/// Hex SHA-256 of the password salted with the owning user's UUID.
#[must_use]
pub fn digest_password(user: UserUuid, password: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(user.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());

    format!("{:x}", hasher.finalize())
}

/// Whether `password` produces `digest` for `user`.
#[must_use]
pub fn verify_password(user: UserUuid, password: &str, digest: &str) -> bool {
    digest_password(user, password) == digest
}

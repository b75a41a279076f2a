//! Identity

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Prefix shared by every persisted cart slot.
pub const CART_SLOT_PREFIX: &str = "cart_";

const GUEST: &str = "guest";

/// Namespace under which a cart snapshot is persisted.
///
/// This is not a credential: it only decides which storage slot a cart lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    /// No signed-in user.
    #[default]
    Guest,

    /// A signed-in user, keyed by user id or, failing that, email.
    User(String),
}

impl Identity {
    /// Builds a user identity, falling back to [`Identity::Guest`] for blank keys.
    pub fn user(key: impl Into<String>) -> Self {
        let key = key.into();

        if key.trim().is_empty() || key == GUEST {
            Self::Guest
        } else {
            Self::User(key)
        }
    }

    /// Whether this is the anonymous identity.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    /// The identity key: `guest` or the user key.
    pub fn key(&self) -> &str {
        match self {
            Self::Guest => GUEST,
            Self::User(key) => key,
        }
    }

    /// Storage key of this identity's cart snapshot, `cart_<identity>`.
    pub fn slot_key(&self) -> String {
        format!("{CART_SLOT_PREFIX}{}", self.key())
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

/// The signed-in user as stored by the session layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User id
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    /// User email
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    /// Resolves the cart identity: user id, else email, else guest.
    pub fn identity(&self) -> Identity {
        [self.id.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
            .map_or(Identity::Guest, Identity::user)
    }
}

impl From<&SessionUser> for Identity {
    fn from(user: &SessionUser) -> Self {
        user.identity()
    }
}

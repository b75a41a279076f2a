//! Sessions

use std::{
    fmt::Debug,
    sync::{Arc, RwLock},
};

use tracing::{info, warn};

use crate::{
    identity::{Identity, SessionUser},
    migration::{MigrationOutcome, migrate_guest_cart},
    storage::SnapshotStorage,
};

/// Source of the currently signed-in identity.
///
/// Cart persistence asks on every operation, so a sign in or sign out between two operations
/// is picked up immediately.
pub trait SessionProvider: Debug + Send + Sync {
    /// The active identity, [`Identity::Guest`] when nobody is signed in.
    fn current_identity(&self) -> Identity;
}

impl SessionProvider for Identity {
    fn current_identity(&self) -> Identity {
        self.clone()
    }
}

/// In-process session shared between a cart and whatever signs users in.
#[derive(Debug, Clone)]
pub struct SharedSession {
    storage: Arc<dyn SnapshotStorage>,
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl SharedSession {
    /// Creates a signed-out session over the given cart storage.
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            storage,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Signs `user` in, first moving any guest cart into the user's slot.
    ///
    /// Migration failures are logged and otherwise ignored.
    pub fn sign_in(&self, user: SessionUser) -> MigrationOutcome {
        let identity = user.identity();
        let outcome = migrate_guest_cart(self.storage.as_ref(), &identity);

        match self.user.write() {
            Ok(mut current) => *current = Some(user),
            Err(poisoned) => *poisoned.into_inner() = Some(user),
        }

        info!(%identity, ?outcome, "signed in");

        outcome
    }

    /// Signs out, returning the cart to the guest slot.
    pub fn sign_out(&self) {
        match self.user.write() {
            Ok(mut current) => *current = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }

        info!("signed out");
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<SessionUser> {
        match self.user.read() {
            Ok(user) => user.clone(),
            Err(poisoned) => {
                warn!("session lock poisoned, reading through it");

                poisoned.into_inner().clone()
            }
        }
    }
}

impl SessionProvider for SharedSession {
    fn current_identity(&self) -> Identity {
        self.user()
            .as_ref()
            .map_or(Identity::Guest, SessionUser::identity)
    }
}

//! Guest cart migration

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{identity::Identity, storage::SnapshotStorage};

/// What happened to the guest cart when a user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The new identity is itself the guest, so nothing moves.
    NotNeeded,

    /// No guest cart, or an empty one.
    NoGuestCart,

    /// The guest cart was copied to the user slot and removed.
    Migrated {
        /// Entries in the copied snapshot
        entries: usize,
    },

    /// Copying failed. The failure was logged and sign-in continues.
    Failed,
}

/// Moves a non-empty `cart_guest` snapshot into `identity`'s slot.
///
/// The snapshot is copied verbatim and overwrites whatever the user slot held. Failures never
/// propagate: sign-in must not be blocked by cart storage.
pub fn migrate_guest_cart(storage: &dyn SnapshotStorage, identity: &Identity) -> MigrationOutcome {
    if identity.is_guest() {
        return MigrationOutcome::NotNeeded;
    }

    let guest_key = Identity::Guest.slot_key();

    let raw = match storage.get(&guest_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return MigrationOutcome::NoGuestCart,
        Err(error) => {
            warn!(%error, "failed to read guest cart during sign in");

            return MigrationOutcome::Failed;
        }
    };

    let entries = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => entries.len(),
        Ok(_) => {
            warn!("guest cart is not an array, leaving it in place");

            return MigrationOutcome::Failed;
        }
        Err(error) => {
            warn!(%error, "failed to parse guest cart during sign in");

            return MigrationOutcome::Failed;
        }
    };

    if entries == 0 {
        debug!("guest cart is empty, nothing to migrate");

        return MigrationOutcome::NoGuestCart;
    }

    let user_key = identity.slot_key();

    if let Err(error) = storage.set(&user_key, &raw) {
        warn!(%error, slot = %user_key, "failed to copy guest cart");

        return MigrationOutcome::Failed;
    }

    if let Err(error) = storage.remove(&guest_key) {
        warn!(%error, "copied guest cart but failed to remove it");

        return MigrationOutcome::Failed;
    }

    info!(slot = %user_key, entries, "migrated guest cart");

    MigrationOutcome::Migrated { entries }
}

//! Cart store
//!
//! The in-process cart for one client. Every mutation is validated, applied, and then the
//! whole line-item sequence is written to the active identity's slot. Other sessions sharing
//! the same storage pick the change up on their next [`CartStore::refresh_cart`].

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    identity::Identity,
    items::{LineItem, LineItemError},
    pricing::{self, Totals},
    reconcile::ReconcileOutcome,
    session::SessionProvider,
    snapshot::{decode_snapshot, encode_snapshot},
    storage::SnapshotStorage,
};

/// Errors returned by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The item was rejected before touching the cart.
    #[error("invalid item: {0}")]
    InvalidItem(#[from] LineItemError),
}

/// Identity-scoped, persisted shopping cart.
#[derive(Debug)]
pub struct CartStore {
    storage: Arc<dyn SnapshotStorage>,
    session: Arc<dyn SessionProvider>,
    items: Mutex<Vec<LineItem>>,
    revision: watch::Sender<u64>,
}

impl CartStore {
    /// Opens the cart of the currently active identity.
    ///
    /// Invalid stored entries are dropped and the cleaned list is written back. An unreadable
    /// slot starts the cart empty without touching storage.
    pub fn open(storage: Arc<dyn SnapshotStorage>, session: Arc<dyn SessionProvider>) -> Self {
        let identity = session.current_identity();
        let slot = identity.slot_key();

        let items = match storage.get(&slot) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(decoded) => {
                    if decoded.had_invalid_entries() {
                        info!(%slot, dropped = decoded.dropped, "cleaned stored cart");

                        write_slot(storage.as_ref(), &slot, &decoded.items);
                    }

                    decoded.items
                }
                Err(error) => {
                    warn!(%slot, %error, "ignoring unreadable stored cart");

                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%slot, %error, "failed to read stored cart");

                Vec::new()
            }
        };

        debug!(%identity, items = items.len(), "opened cart");

        let (revision, _) = watch::channel(0);

        Self {
            storage,
            session,
            items: Mutex::new(items),
            revision,
        }
    }

    /// The identity whose slot this cart currently writes to.
    pub fn identity(&self) -> Identity {
        self.session.current_identity()
    }

    /// Adds `item`, merging its quantity into an existing line with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] and leaves the cart unchanged if the item fails
    /// [`LineItem::validate`].
    pub fn add_item(&self, item: LineItem) -> Result<(), CartError> {
        if let Err(reason) = item.validate() {
            warn!(id = %item.id, %reason, "rejected cart item");

            return Err(reason.into());
        }

        let mut items = self.lock();

        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                let merged = LineItem {
                    quantity: existing.quantity.saturating_add(item.quantity),
                    ..existing.clone()
                };

                if let Err(reason) = merged.validate() {
                    warn!(id = %item.id, %reason, "rejected merged cart item");

                    return Err(reason.into());
                }

                *existing = merged;
            }
            None => items.push(item),
        }

        self.commit(&items);

        Ok(())
    }

    /// Removes the line with `id`. Returns whether anything was removed.
    pub fn remove_item(&self, id: &str) -> bool {
        let mut items = self.lock();
        let before = items.len();

        items.retain(|item| item.id != id);

        if items.len() == before {
            return false;
        }

        self.commit(&items);

        true
    }

    /// Sets the quantity of the line with `id`; zero or below removes the line.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut items = self.lock();

        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return false;
        };

        if item.quantity == quantity {
            return false;
        }

        item.quantity = quantity;

        self.commit(&items);

        true
    }

    /// Empties the cart and persists the empty sequence immediately.
    pub fn clear_cart(&self) {
        let mut items = self.lock();
        let was_empty = items.is_empty();

        items.clear();

        self.persist(&items);

        if !was_empty {
            self.bump();
        }
    }

    /// Current line items in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.lock().clone()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        pricing::total_items(&self.lock())
    }

    /// Sum of price × quantity, before tax.
    pub fn total_price(&self) -> Decimal {
        pricing::subtotal(&self.lock())
    }

    /// Subtotal, tax and total for the current lines.
    pub fn totals(&self) -> Totals {
        Totals::from_items(&self.lock())
    }

    /// Re-reads the active identity's slot and adopts it if it differs from the cart.
    ///
    /// Storage and parse failures are logged and leave the cart as it is, as does an empty
    /// slot.
    pub fn refresh_cart(&self) -> ReconcileOutcome {
        let slot = self.identity().slot_key();

        let raw = match self.storage.get(&slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ReconcileOutcome::SlotEmpty,
            Err(error) => {
                warn!(%slot, %error, "failed to read stored cart");

                return ReconcileOutcome::Failed;
            }
        };

        let decoded = match decode_snapshot(&raw) {
            Ok(decoded) => decoded,
            Err(error) => {
                warn!(%slot, %error, "ignoring unreadable stored cart");

                return ReconcileOutcome::Failed;
            }
        };

        let mut items = self.lock();

        if *items == decoded.items {
            return ReconcileOutcome::Unchanged;
        }

        debug!(%slot, items = decoded.items.len(), "adopting stored cart");

        *items = decoded.items;

        self.bump();

        ReconcileOutcome::Replaced
    }

    /// Subscribes to change notifications.
    ///
    /// The value is a revision counter, bumped only when the cart's contents actually change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LineItem>> {
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn commit(&self, items: &[LineItem]) {
        self.persist(items);
        self.bump();
    }

    fn persist(&self, items: &[LineItem]) {
        let slot = self.identity().slot_key();

        write_slot(self.storage.as_ref(), &slot, items);
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

fn write_slot(storage: &dyn SnapshotStorage, slot: &str, items: &[LineItem]) {
    let encoded = match encode_snapshot(items) {
        Ok(encoded) => encoded,
        Err(error) => {
            warn!(%slot, %error, "failed to encode cart");

            return;
        }
    };

    if let Err(error) = storage.set(slot, &encoded) {
        warn!(%slot, %error, "failed to persist cart");
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;
    use crate::{identity::SessionUser, session::SharedSession, storage::MemoryStorage};

    fn item(id: &str, price: i64, quantity: u32) -> LineItem {
        LineItem::new(id, format!("Product {id}"), Decimal::from(price), quantity)
    }

    fn guest_cart(storage: &MemoryStorage) -> CartStore {
        CartStore::open(Arc::new(storage.clone()), Arc::new(Identity::Guest))
    }

    fn stored_ids(storage: &MemoryStorage, slot: &str) -> TestResult<Vec<String>> {
        let raw = storage.get(slot)?.ok_or("slot is empty")?;

        Ok(decode_snapshot(&raw)?
            .items
            .into_iter()
            .map(|item| item.id)
            .collect())
    }

    #[test]
    fn re_adding_an_item_merges_quantities() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 2))?;
        cart.add_item(item("p1", 10, 3))?;

        let items = cart.items();

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.quantity), Some(5));

        Ok(())
    }

    #[test]
    fn insertion_order_is_preserved() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("b", 1, 1))?;
        cart.add_item(item("a", 1, 1))?;
        cart.add_item(item("b", 1, 1))?;

        let ids: Vec<_> = cart.items().into_iter().map(|item| item.id).collect();

        assert_eq!(ids, ["b", "a"]);

        Ok(())
    }

    #[test]
    fn zero_quantity_update_removes_the_line() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 2))?;

        assert!(cart.update_quantity("p1", 0), "line should be removed");
        assert!(cart.is_empty());
        assert_eq!(stored_ids(&storage, "cart_guest")?, Vec::<String>::new());

        Ok(())
    }

    #[test]
    fn negative_quantity_update_removes_the_line() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 2))?;
        cart.update_quantity("p1", -3);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_sets_the_value() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 2))?;

        assert!(cart.update_quantity("p1", 7), "quantity should change");
        assert_eq!(cart.total_items(), 7);
        assert!(!cart.update_quantity("missing", 7), "absent ids are a no-op");

        Ok(())
    }

    #[test]
    fn invalid_item_is_rejected_and_cart_unchanged() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 1))?;

        let result = cart.add_item(LineItem::new("", "x", Decimal::ONE, 1));

        assert_eq!(result, Err(CartError::InvalidItem(LineItemError::MissingId)));
        assert_eq!(stored_ids(&storage, "cart_guest")?, ["p1"]);
        assert_eq!(cart.items().len(), 1);

        Ok(())
    }

    #[test]
    fn merge_that_would_overflow_the_total_is_rejected() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);
        let price = Decimal::MAX / Decimal::from(2);

        cart.add_item(LineItem::new("p1", "Vault", price, 1))?;

        let result = cart.add_item(LineItem::new("p1", "Vault", price, 1));

        assert_eq!(
            result,
            Err(CartError::InvalidItem(LineItemError::PriceOutOfRange(
                "p1".to_string()
            )))
        );
        assert_eq!(cart.total_items(), 1);

        Ok(())
    }

    #[test]
    fn open_drops_stored_prices_too_large_to_total() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(
            "cart_guest",
            r#"[{"id":"p1","price":"79228162514264337593543950335","quantity":2},{"id":"p2","price":3,"quantity":1}]"#,
        )?;

        let cart = guest_cart(&storage);

        assert_eq!(cart.total_price(), Decimal::from(3));
        assert_eq!(cart.totals().total, Decimal::new(33, 1));
        assert_eq!(stored_ids(&storage, "cart_guest")?, ["p2"]);

        Ok(())
    }

    #[test]
    fn totals_of_many_huge_lines_saturate() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);
        let price = Decimal::MAX / Decimal::from(2);

        cart.add_item(LineItem::new("p1", "Vault", price, 1))?;
        cart.add_item(LineItem::new("p2", "Vault", price, 1))?;
        cart.add_item(LineItem::new("p3", "Vault", price, 1))?;

        assert_eq!(cart.total_price(), Decimal::MAX);
        assert_eq!(cart.totals().total, Decimal::MAX);

        Ok(())
    }

    #[test]
    fn own_write_with_precise_price_refreshes_as_unchanged() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);
        let price = Decimal::from_str("0.1234567890123456789")?;

        cart.add_item(LineItem::new("p1", "Sample", price, 1))?;

        let revision = cart.revision();

        assert_eq!(cart.refresh_cart(), ReconcileOutcome::Unchanged);
        assert_eq!(cart.revision(), revision);
        assert_eq!(cart.items().first().map(|item| item.price), Some(price));

        Ok(())
    }

    #[test]
    fn removing_an_absent_item_is_a_no_op() {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        assert!(!cart.remove_item("nope"), "nothing should be removed");
        assert_eq!(cart.revision(), 0);
    }

    #[test]
    fn totals_follow_current_items() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 2))?;
        cart.add_item(item("p2", 5, 1))?;

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::from(25));
        assert_eq!(cart.totals().total, Decimal::new(275, 1));

        cart.remove_item("p1");

        assert_eq!(cart.total_price(), Decimal::from(5));

        Ok(())
    }

    #[test]
    fn mutations_persist_to_the_identity_slot() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = CartStore::open(Arc::new(storage.clone()), Arc::new(Identity::user("u1")));

        cart.add_item(item("p1", 10, 1))?;

        assert_eq!(stored_ids(&storage, "cart_u1")?, ["p1"]);
        assert_eq!(storage.get("cart_guest")?, None);

        Ok(())
    }

    #[test]
    fn identity_is_resolved_on_every_write() -> TestResult {
        let storage = MemoryStorage::new();
        let session = SharedSession::new(Arc::new(storage.clone()));
        let cart = CartStore::open(Arc::new(storage.clone()), Arc::new(session.clone()));

        cart.add_item(item("p1", 10, 1))?;

        session.sign_in(SessionUser {
            id: Some("u1".to_string()),
            email: None,
        });

        cart.add_item(item("p2", 10, 1))?;

        assert_eq!(stored_ids(&storage, "cart_u1")?, ["p1", "p2"]);

        Ok(())
    }

    #[test]
    fn open_drops_invalid_entries_and_writes_back() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set(
            "cart_guest",
            r#"[{"id":"","name":"x","price":1,"quantity":1},{"id":"p1","name":"ok","price":1,"quantity":1}]"#,
        )?;

        let cart = guest_cart(&storage);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(stored_ids(&storage, "cart_guest")?, ["p1"]);

        let raw = storage.get("cart_guest")?.ok_or("slot is empty")?;

        assert!(!raw.contains(r#""id":"""#), "invalid entry should be gone");

        Ok(())
    }

    #[test]
    fn open_ignores_corrupt_slot() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set("cart_guest", "{corrupt")?;

        let cart = guest_cart(&storage);

        assert!(cart.is_empty());
        assert_eq!(storage.get("cart_guest")?.as_deref(), Some("{corrupt"));

        Ok(())
    }

    #[test]
    fn refresh_adopts_a_different_snapshot() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 1))?;

        storage.set("cart_guest", r#"[{"id":"p2","name":"Other","price":5,"quantity":1}]"#)?;

        assert_eq!(cart.refresh_cart(), ReconcileOutcome::Replaced);

        let items = cart.items();

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.id.as_str()), Some("p2"));
        assert_eq!(items.first().map(|item| item.quantity), Some(1));

        Ok(())
    }

    #[test]
    fn refresh_does_not_notify_when_unchanged() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);
        let mut changes = cart.subscribe();

        cart.add_item(item("p1", 10, 1))?;
        changes.borrow_and_update();

        assert_eq!(cart.refresh_cart(), ReconcileOutcome::Unchanged);
        assert!(!changes.has_changed()?, "no notification expected");

        Ok(())
    }

    #[test]
    fn refresh_leaves_cart_alone_for_missing_or_corrupt_slots() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 1))?;
        storage.remove("cart_guest")?;

        assert_eq!(cart.refresh_cart(), ReconcileOutcome::SlotEmpty);

        storage.set("cart_guest", "42")?;

        assert_eq!(cart.refresh_cart(), ReconcileOutcome::Failed);
        assert_eq!(cart.items().len(), 1);

        Ok(())
    }

    #[test]
    fn clear_cart_persists_immediately() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);

        cart.add_item(item("p1", 10, 1))?;
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(storage.get("cart_guest")?.as_deref(), Some("[]"));
        assert_eq!(cart.refresh_cart(), ReconcileOutcome::Unchanged);

        Ok(())
    }

    #[test]
    fn mutations_bump_the_revision() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = guest_cart(&storage);
        let changes = cart.subscribe();

        cart.add_item(item("p1", 10, 1))?;
        cart.update_quantity("p1", 3);
        cart.remove_item("p1");

        assert_eq!(*changes.borrow(), 3);

        Ok(())
    }
}

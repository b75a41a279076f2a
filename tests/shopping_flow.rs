//! Integration tests for carts shared between sessions of one storage origin

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use testresult::TestResult;

use gazalla::{
    CartStore, CheckoutDetails, CheckoutError, Customer, FileStorage, LineItem, MemoryStorage,
    NewOrder, OrderSubmitter, ReconcileOutcome, Reconciler, SessionUser, SharedSession,
    ShippingAddress, SnapshotStorage, SubmitError, migration::MigrationOutcome,
};

fn watch_item(quantity: u32) -> LineItem {
    LineItem::new("watch", "Chronograph Watch", Decimal::new(19999, 2), quantity)
}

fn belt_item(quantity: u32) -> LineItem {
    LineItem::new("belt", "Leather Belt", Decimal::new(3999, 2), quantity)
}

fn details() -> CheckoutDetails {
    CheckoutDetails {
        customer: Customer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        },
        shipping_address: ShippingAddress {
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            zip_code: "SW1Y 4JH".to_string(),
        },
    }
}

fn open(storage: &Arc<dyn SnapshotStorage>, session: &SharedSession) -> CartStore {
    CartStore::open(Arc::clone(storage), Arc::new(session.clone()))
}

#[derive(Debug, Default)]
struct RecordingSubmitter {
    orders: Mutex<Vec<NewOrder>>,
    fail: bool,
}

#[async_trait]
impl OrderSubmitter for RecordingSubmitter {
    async fn submit(&self, order: NewOrder) -> Result<String, SubmitError> {
        if self.fail {
            return Err(SubmitError::Unavailable("connection refused".to_string()));
        }

        let mut orders = self
            .orders
            .lock()
            .map_err(|_poisoned| SubmitError::Rejected("poisoned".to_string()))?;

        orders.push(order);

        Ok(format!("order-{}", orders.len()))
    }
}

#[test]
fn second_tab_sees_first_tabs_edits_after_refresh() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));

    let first = open(&storage, &session);
    let second = open(&storage, &session);

    first.add_item(watch_item(1))?;
    first.add_item(belt_item(2))?;

    assert!(second.is_empty());
    assert_eq!(second.refresh_cart(), ReconcileOutcome::Replaced);
    assert_eq!(second.total_items(), 3);
    assert_eq!(second.refresh_cart(), ReconcileOutcome::Unchanged);

    Ok(())
}

#[test]
fn last_writer_wins_between_tabs() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));

    let first = open(&storage, &session);
    let second = open(&storage, &session);

    first.add_item(watch_item(1))?;
    second.add_item(belt_item(1))?;

    first.refresh_cart();

    let ids: Vec<_> = first.items().into_iter().map(|item| item.id).collect();

    assert_eq!(ids, ["belt"]);

    Ok(())
}

#[test]
fn guest_cart_follows_the_user_after_sign_in() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));
    let cart = open(&storage, &session);

    cart.add_item(watch_item(2))?;

    let outcome = session.sign_in(SessionUser {
        id: Some("user-42".to_string()),
        email: None,
    });

    assert_eq!(outcome, MigrationOutcome::Migrated { entries: 1 });
    assert_eq!(storage.get("cart_guest")?, None);
    assert_eq!(cart.refresh_cart(), ReconcileOutcome::Unchanged);

    cart.add_item(belt_item(1))?;

    assert!(storage.get("cart_user-42")?.is_some_and(|raw| raw.contains("belt")));

    session.sign_out();

    assert_eq!(cart.refresh_cart(), ReconcileOutcome::SlotEmpty);
    assert_eq!(cart.total_items(), 3);

    Ok(())
}

#[test]
fn file_storage_shares_carts_between_stores() -> TestResult {
    let dir = tempfile::tempdir()?;

    let storage_a: Arc<dyn SnapshotStorage> = Arc::new(FileStorage::open(dir.path())?);
    let storage_b: Arc<dyn SnapshotStorage> = Arc::new(FileStorage::open(dir.path())?);

    let session_a = SharedSession::new(Arc::clone(&storage_a));
    let session_b = SharedSession::new(Arc::clone(&storage_b));

    let cart_a = open(&storage_a, &session_a);

    cart_a.add_item(watch_item(1))?;
    cart_a.update_quantity("watch", 4);

    let cart_b = open(&storage_b, &session_b);

    assert_eq!(cart_b.total_items(), 4);
    assert_eq!(cart_b.total_price(), Decimal::new(79996, 2));

    Ok(())
}

#[test]
fn plus_addressed_email_cart_persists_in_file_storage() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage: Arc<dyn SnapshotStorage> = Arc::new(FileStorage::open(dir.path())?);
    let session = SharedSession::new(Arc::clone(&storage));

    let cart = open(&storage, &session);

    cart.add_item(belt_item(1))?;

    let outcome = session.sign_in(SessionUser {
        id: None,
        email: Some("jane+shop@example.com".to_string()),
    });

    assert_eq!(outcome, MigrationOutcome::Migrated { entries: 1 });

    cart.add_item(watch_item(1))?;

    assert_eq!(cart.refresh_cart(), ReconcileOutcome::Unchanged);
    assert_eq!(open(&storage, &session).total_items(), 2);

    Ok(())
}

#[tokio::test]
async fn checkout_places_order_and_empties_every_tab() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));

    let cart = open(&storage, &session);
    let other_tab = open(&storage, &session);

    cart.add_item(belt_item(2))?;
    other_tab.refresh_cart();

    let submitter = RecordingSubmitter::default();
    let receipt = cart.checkout(details(), &submitter).await?;

    assert_eq!(receipt.order_id, "order-1");
    assert_eq!(receipt.total(), Decimal::new(87978, 3));
    assert_eq!(receipt.order.user_id, "guest");
    assert!(cart.is_empty());

    assert_eq!(other_tab.refresh_cart(), ReconcileOutcome::Replaced);
    assert!(other_tab.is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_checkout_keeps_the_cart() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));
    let cart = open(&storage, &session);

    cart.add_item(watch_item(1))?;

    let submitter = RecordingSubmitter {
        fail: true,
        ..RecordingSubmitter::default()
    };

    let result = cart.checkout(details(), &submitter).await;

    assert!(matches!(result, Err(CheckoutError::Submission(_))));
    assert_eq!(cart.total_items(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reconciler_picks_up_changes_from_another_tab() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());
    let session = SharedSession::new(Arc::clone(&storage));

    let writer = open(&storage, &session);
    let reader = Arc::new(open(&storage, &session));
    let mut changes = reader.subscribe();

    let handle = Reconciler::spawn(Arc::clone(&reader), Duration::from_secs(5));

    writer.add_item(watch_item(1))?;

    tokio::time::sleep(Duration::from_secs(6)).await;

    changes.changed().await?;

    assert_eq!(reader.total_items(), 1);

    handle.shutdown().await;

    Ok(())
}

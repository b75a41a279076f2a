//! Reconciliation
//!
//! Sessions sharing one storage origin learn about each other's edits by polling: on every
//! tick the cart re-reads its slot and adopts the stored contents when they differ. The last
//! writer wins at whole-cart granularity, so two sessions editing within one period may
//! overwrite each other's in-process view.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info};

use crate::cart::CartStore;

/// Default polling period.
pub const DEFAULT_RECONCILE_PERIOD: Duration = Duration::from_secs(5);

/// Result of one reconciliation read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The stored snapshot matches the cart.
    Unchanged,

    /// The cart adopted a different stored snapshot.
    Replaced,

    /// Nothing is stored for the active identity.
    SlotEmpty,

    /// The slot could not be read or parsed.
    Failed,
}

/// Periodically reconciles a cart with its stored snapshot.
#[derive(Debug)]
pub struct Reconciler;

impl Reconciler {
    /// Spawns the polling task on the current tokio runtime.
    ///
    /// The first read happens one `period` after spawning. The task runs until the returned
    /// handle is shut down or dropped.
    pub fn spawn(store: Arc<CartStore>, period: Duration) -> ReconcilerHandle {
        let (shutdown, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let outcome = store.refresh_cart();

                        debug!(?outcome, "reconciled cart");
                    }
                    _ = stopped.changed() => break,
                }
            }

            info!("cart reconciler stopped");
        });

        ReconcilerHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Owns a running [`Reconciler`] task.
#[derive(Debug)]
pub struct ReconcilerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReconcilerHandle {
    /// Stops polling and waits for the task to finish.
    pub async fn shutdown(mut self) {
        self.shutdown.send_replace(true);

        if let Some(task) = self.task.take()
            && let Err(error) = task.await
        {
            debug!(%error, "cart reconciler ended abnormally");
        }
    }

    /// Whether the polling task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for ReconcilerHandle {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        identity::Identity,
        items::LineItem,
        storage::{MemoryStorage, SnapshotStorage},
    };

    const OTHER_TAB: &str = r#"[{"id":"p2","name":"Sunglasses","price":89.99,"quantity":1}]"#;

    fn guest_cart(storage: &MemoryStorage) -> Arc<CartStore> {
        Arc::new(CartStore::open(
            Arc::new(storage.clone()),
            Arc::new(Identity::Guest),
        ))
    }

    fn ids(store: &CartStore) -> Vec<String> {
        store.items().into_iter().map(|item| item.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn tick_adopts_snapshot_written_elsewhere() -> TestResult {
        let storage = MemoryStorage::new();
        let store = guest_cart(&storage);

        store.add_item(LineItem::new("p1", "Wallet", Decimal::new(4999, 2), 1))?;

        let handle = Reconciler::spawn(Arc::clone(&store), DEFAULT_RECONCILE_PERIOD);

        storage.set("cart_guest", OTHER_TAB)?;

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ids(&store), ["p1"], "no read before the first period");

        tokio::time::sleep(DEFAULT_RECONCILE_PERIOD).await;
        assert_eq!(ids(&store), ["p2"]);

        handle.shutdown().await;

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_snapshot_does_not_notify() -> TestResult {
        let storage = MemoryStorage::new();
        let store = guest_cart(&storage);

        store.add_item(LineItem::new("p1", "Wallet", Decimal::new(4999, 2), 1))?;

        let mut changes = store.subscribe();
        changes.borrow_and_update();

        let handle = Reconciler::spawn(Arc::clone(&store), DEFAULT_RECONCILE_PERIOD);

        tokio::time::sleep(DEFAULT_RECONCILE_PERIOD * 3).await;

        assert!(!changes.has_changed()?, "no notification expected");

        handle.shutdown().await;

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_polling() -> TestResult {
        let storage = MemoryStorage::new();
        let store = guest_cart(&storage);

        let handle = Reconciler::spawn(Arc::clone(&store), DEFAULT_RECONCILE_PERIOD);

        handle.shutdown().await;

        storage.set("cart_guest", OTHER_TAB)?;
        tokio::time::sleep(DEFAULT_RECONCILE_PERIOD * 2).await;

        assert!(store.is_empty());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() -> TestResult {
        let storage = MemoryStorage::new();
        let store = guest_cart(&storage);

        drop(Reconciler::spawn(Arc::clone(&store), DEFAULT_RECONCILE_PERIOD));

        tokio::time::sleep(Duration::from_millis(1)).await;

        storage.set("cart_guest", OTHER_TAB)?;
        tokio::time::sleep(DEFAULT_RECONCILE_PERIOD * 2).await;

        assert!(store.is_empty());

        Ok(())
    }
}

//! Gazalla
//!
//! Cart core for the Gazalla storefront: line items and totals, identity-scoped cart
//! snapshots, polling reconciliation between sessions sharing one storage origin, guest cart
//! migration on sign in, and checkout into an order snapshot.

pub mod cart;
pub mod checkout;
pub mod identity;
pub mod items;
pub mod migration;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod reconcile;
pub mod session;
pub mod snapshot;
pub mod storage;

pub use cart::{CartError, CartStore};
pub use checkout::{CheckoutDetails, CheckoutError, CheckoutReceipt, OrderSubmitter, SubmitError};
pub use identity::{Identity, SessionUser};
pub use items::{LineItem, LineItemError};
pub use orders::{Customer, NewOrder, OrderItem, OrderStatus, ShippingAddress};
pub use pricing::{TAX_RATE, Totals};
pub use products::{Category, Product};
pub use reconcile::{DEFAULT_RECONCILE_PERIOD, ReconcileOutcome, Reconciler, ReconcilerHandle};
pub use session::{SessionProvider, SharedSession};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};

//! Checkout

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::CartStore,
    orders::{Customer, NewOrder, OrderItem, OrderStatus, ShippingAddress},
    pricing,
};

/// Failure reported by an [`OrderSubmitter`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Order storage refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// Order storage could not be reached.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`CartStore::checkout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// A required contact or address field is blank.
    #[error("missing required field: {0}")]
    MissingDetails(&'static str),

    /// The order could not be submitted. The cart is left intact.
    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// Hands finished orders to order storage.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Stores `order`, returning its identifier.
    async fn submit(&self, order: NewOrder) -> Result<String, SubmitError>;
}

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Who is buying
    pub customer: Customer,

    /// Where it goes
    pub shipping_address: ShippingAddress,
}

impl CheckoutDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("firstName", &self.customer.first_name),
            ("lastName", &self.customer.last_name),
            ("email", &self.customer.email),
            ("address", &self.shipping_address.address),
            ("city", &self.shipping_address.city),
            ("zipCode", &self.shipping_address.zip_code),
        ];

        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CheckoutError::MissingDetails(name)),
            None => Ok(()),
        }
    }
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Identifier assigned by order storage
    pub order_id: String,

    /// The order as submitted
    pub order: NewOrder,
}

impl CheckoutReceipt {
    /// Amount charged.
    pub fn total(&self) -> Decimal {
        self.order.total
    }
}

impl CartStore {
    /// Submits the cart as a pending order and clears it on success.
    ///
    /// The order total is the subtotal plus [`pricing::TAX_RATE`]. The cleared cart is
    /// persisted before this returns, so a later reconciliation cannot bring the items back.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to order.
    /// - [`CheckoutError::MissingDetails`]: a required field is blank.
    /// - [`CheckoutError::Submission`]: the submitter failed; the cart is untouched.
    pub async fn checkout(
        &self,
        details: CheckoutDetails,
        submitter: &dyn OrderSubmitter,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let items = self.items();

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        details.validate()?;

        let order = NewOrder {
            user_id: self.identity().key().to_string(),
            customer: details.customer,
            shipping_address: details.shipping_address,
            items: items.iter().map(OrderItem::from).collect(),
            total: pricing::checkout_total(pricing::subtotal(&items)),
            status: OrderStatus::Pending,
        };

        let order_id = match submitter.submit(order.clone()).await {
            Ok(order_id) => order_id,
            Err(error) => {
                warn!(%error, "checkout failed, keeping cart");

                return Err(error.into());
            }
        };

        self.clear_cart();

        info!(%order_id, total = %order.total, items = order.items.len(), "order placed");

        Ok(CheckoutReceipt { order_id, order })
    }
}

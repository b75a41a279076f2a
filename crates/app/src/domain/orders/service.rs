//! Orders service.

use async_trait::async_trait;
use gazalla::{NewOrder, OrderStatus};
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderUuid},
        repositories::{PgOrderItemsRepository, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user_id: Option<String>) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, user_id.as_deref())
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items = self.items_repository.get_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.orders_repository.get_order(&mut tx, order).await?;

        let mut items = self.items_repository.get_order_items(&mut tx, &[order]).await?;

        tx.commit().await?;

        found.items = items.remove(&order).unwrap_or_default();

        Ok(found)
    }

    async fn create_order(
        &self,
        uuid: OrderUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        validate_new_order(&order)?;

        let mut tx = self.db.begin().await?;

        let mut created = self
            .orders_repository
            .create_order(&mut tx, uuid, &order)
            .await?;

        created.items = self
            .items_repository
            .create_order_items(&mut tx, uuid, &order.items)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        let mut items = self.items_repository.get_order_items(&mut tx, &[order]).await?;

        tx.commit().await?;

        updated.items = items.remove(&order).unwrap_or_default();

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Rejects orders that could never be fulfilled.
pub(crate) fn validate_new_order(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() || order.user_id.trim().is_empty() {
        return Err(OrdersServiceError::MissingRequiredData);
    }

    let bad_item = order
        .items
        .iter()
        .any(|item| item.quantity == 0 || item.price < Decimal::ZERO);

    if bad_item || order.total < Decimal::ZERO {
        return Err(OrdersServiceError::InvalidData);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Lists orders newest first, optionally only those placed by `user_id`.
    async fn list_orders(&self, user_id: Option<String>) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Stores a submitted order under `uuid`.
    async fn create_order(
        &self,
        uuid: OrderUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Moves an order to a new fulfilment status.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes an order and its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}

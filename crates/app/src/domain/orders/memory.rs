//! In-memory orders store

use std::sync::Arc;

use async_trait::async_trait;
use gazalla::{NewOrder, OrderStatus};
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::orders::{
    OrdersService,
    errors::OrdersServiceError,
    models::{Order, OrderUuid},
    service::validate_new_order,
};

/// Orders held in process memory, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrdersService {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl MemoryOrdersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersService for MemoryOrdersService {
    async fn list_orders(&self, user_id: Option<String>) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.orders.read().await;

        Ok(orders
            .iter()
            .rev()
            .filter(|order| user_id.as_ref().is_none_or(|user| &order.user_id == user))
            .cloned()
            .collect())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|candidate| candidate.uuid == order)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn create_order(
        &self,
        uuid: OrderUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        validate_new_order(&order)?;

        let mut orders = self.orders.write().await;

        if orders.iter().any(|existing| existing.uuid == uuid) {
            return Err(OrdersServiceError::AlreadyExists);
        }

        let created = Order::from_new(uuid, order, Timestamp::now());

        orders.push(created.clone());

        Ok(created)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut orders = self.orders.write().await;

        let existing = orders
            .iter_mut()
            .find(|candidate| candidate.uuid == order)
            .ok_or(OrdersServiceError::NotFound)?;

        existing.status = status;
        existing.updated_at = Timestamp::now();

        Ok(existing.clone())
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut orders = self.orders.write().await;
        let before = orders.len();

        orders.retain(|candidate| candidate.uuid != order);

        if orders.len() == before {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::orders::service::tests::sample_order;

    use super::*;

    #[tokio::test]
    async fn orders_list_newest_first_and_filter_by_user() -> TestResult {
        let service = MemoryOrdersService::new();
        let first = OrderUuid::new();
        let second = OrderUuid::new();

        service.create_order(first, sample_order("ada")).await?;
        service.create_order(second, sample_order("grace")).await?;

        let all: Vec<_> = service
            .list_orders(None)
            .await?
            .into_iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(all, [second, first]);

        let ada = service.list_orders(Some("ada".to_string())).await?;

        assert_eq!(ada.len(), 1);
        assert_eq!(ada.first().map(Order::total_items), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn status_updates_and_deletes() -> TestResult {
        let service = MemoryOrdersService::new();
        let uuid = OrderUuid::new();

        service.create_order(uuid, sample_order("ada")).await?;

        let updated = service
            .update_order_status(uuid, OrderStatus::Delivered)
            .await?;

        assert_eq!(updated.status, OrderStatus::Delivered);

        service.delete_order(uuid).await?;

        assert!(matches!(
            service.delete_order(uuid).await,
            Err(OrdersServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_uuid_is_rejected() -> TestResult {
        let service = MemoryOrdersService::new();
        let uuid = OrderUuid::new();

        service.create_order(uuid, sample_order("ada")).await?;

        assert!(matches!(
            service.create_order(uuid, sample_order("ada")).await,
            Err(OrdersServiceError::AlreadyExists)
        ));

        Ok(())
    }
}

//! Order Items Repository

use gazalla::OrderItem;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::orders::models::OrderUuid;

const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");

/// An item row together with the order it belongs to.
struct OrderItemRow {
    order_uuid: Uuid,
    item: OrderItem,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetches the items of every order in `orders`, grouped by order and kept in position order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<FxHashMap<OrderUuid, Vec<OrderItem>>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: FxHashMap<OrderUuid, Vec<OrderItem>> = FxHashMap::default();

        for row in rows {
            grouped
                .entry(OrderUuid::from_uuid(row.order_uuid))
                .or_default()
                .push(row.item);
        }

        Ok(grouped)
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[OrderItem],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let mut created = Vec::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            let position =
                i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            let row = query_as::<Postgres, OrderItemRow>(CREATE_ORDER_ITEM_SQL)
                .bind(order.into_uuid())
                .bind(position)
                .bind(&item.product_id)
                .bind(&item.name)
                .bind(quantity)
                .bind(item.price)
                .fetch_one(&mut **tx)
                .await?;

            created.push(row.item);
        }

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            item: OrderItem {
                product_id: row.try_get("product_id")?,
                name: row.try_get("name")?,
                quantity,
                price: row.try_get::<Decimal, _>("price")?,
            },
        })
    }
}

use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecord,
    model::{
        order::Order as OrderModel, order_item::OrderItem as OrderItemModel, status::OrderStatus,
    },
    repository::inventory::InventoryLedger,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order_with_items(
        &self,
        record: &CreateOrderRecord,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        info!(
            "🏗️ Creating order for user {} with {} line(s)",
            record.user_id,
            record.lines.len()
        );

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // Authoritative stock check. Each line locks its own book row; a
        // failure here drops the transaction and with it every decrement
        // already made for this order.
        for line in &record.lines {
            InventoryLedger::reserve(&mut *tx, line.book_id, line.quantity).await?;
        }

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
        INSERT INTO orders (
            user_id, total_amount, status,
            payment_method, shipping_method,
            customer_name, customer_email, customer_phone,
            shipping_address, notes,
            created_at, updated_at
        )
        VALUES ($1, $2, 'confirmed', $3, $4, $5, $6, $7, $8, $9,
                current_timestamp, current_timestamp)
        RETURNING order_id, user_id, total_amount, status, payment_method,
                  shipping_method, customer_name, customer_email, customer_phone,
                  shipping_address, notes, created_at, updated_at,
                  shipped_at, delivered_at
        "#,
        )
        .bind(record.user_id)
        .bind(record.total_amount)
        .bind(&record.payment_method)
        .bind(&record.shipping_method)
        .bind(&record.customer_name)
        .bind(&record.customer_email)
        .bind(&record.customer_phone)
        .bind(&record.shipping_address)
        .bind(&record.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to insert order for user {}: {:?}",
                record.user_id, e
            );
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(record.lines.len());
        for line in &record.lines {
            let item = sqlx::query_as::<_, OrderItemModel>(
                r#"
            INSERT INTO order_items (order_id, book_id, quantity, price, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            RETURNING order_item_id, order_id, book_id, quantity, price, created_at
            "#,
            )
            .bind(order.order_id)
            .bind(line.book_id)
            .bind(line.quantity)
            .bind(line.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to insert line item for order {}: {:?}",
                    order.order_id, e
                );
                RepositoryError::from(e)
            })?;
            items.push(item);
        }

        // The buyer checked out, so their cart is done.
        sqlx::query(
            r#"
        DELETE FROM cart_items
        WHERE cart_id IN (SELECT cart_id FROM carts WHERE user_id = $1)
        "#,
        )
        .bind(record.user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to clear cart for user {}: {:?}",
                record.user_id, e
            );
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order {} for user {}",
            order.order_id, order.user_id
        );
        Ok((order, items))
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Compare-and-swap on the status column. The timestamps are stamped
        // the first time the order reaches the matching state and kept as-is
        // afterwards.
        let updated = sqlx::query_as::<_, OrderModel>(
            r#"
        UPDATE orders
        SET status       = $3,
            shipped_at   = CASE
                               WHEN $3 = 'shipping'::order_status AND shipped_at IS NULL
                               THEN current_timestamp
                               ELSE shipped_at
                           END,
            delivered_at = CASE
                               WHEN $3 = 'delivered'::order_status AND delivered_at IS NULL
                               THEN current_timestamp
                               ELSE delivered_at
                           END,
            updated_at   = current_timestamp
        WHERE order_id = $1 AND status = $2
        RETURNING order_id, user_id, total_amount, status, payment_method,
                  shipping_method, customer_name, customer_email, customer_phone,
                  shipping_address, notes, created_at, updated_at,
                  shipped_at, delivered_at
        "#,
        )
        .bind(order_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update status of order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        if let Some(order) = &updated {
            info!(
                "🔄 Order {} moved from {} to {}",
                order.order_id, from, order.status
            );
        }
        Ok(updated)
    }
}

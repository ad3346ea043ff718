use crate::{
    abstract_trait::order_item::OrderItemQueryRepositoryTrait,
    model::order_item::OrderItem as OrderItemModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderItemQueryRepository {
    db: ConnectionPool,
}

impl OrderItemQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderItemQueryRepositoryTrait for OrderItemQueryRepository {
    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItemModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let items = sqlx::query_as::<_, OrderItemModel>(
            r#"
        SELECT order_item_id, order_id, book_id, quantity, price, created_at
        FROM order_items
        WHERE order_id = $1
        ORDER BY created_at
        "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to fetch order items for order {}: {:?}",
                order_id, e
            );
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}

use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
        SELECT order_id, user_id, total_amount, status, payment_method,
               shipping_method, customer_name, customer_email, customer_phone,
               shipping_address, notes, created_at, updated_at,
               shipped_at, delivered_at
        FROM orders
        WHERE order_id = $1
        "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        Ok(order)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("📦 Fetching orders for user: {}", user_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
        SELECT order_id, user_id, total_amount, status, payment_method,
               shipping_method, customer_name, customer_email, customer_phone,
               shipping_address, notes, created_at, updated_at,
               shipped_at, delivered_at
        FROM orders
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }
}

use crate::{abstract_trait::cart::CartRepositoryTrait, model::cart::CartItem as CartItemModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_items_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartItemModel>, RepositoryError> {
        info!("🛒 Fetching cart items for user: {}", user_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let items = sqlx::query_as::<_, CartItemModel>(
            r#"
        SELECT ci.cart_item_id, ci.cart_id, ci.book_id, ci.quantity, ci.added_at
        FROM cart_items ci
        JOIN carts c ON c.cart_id = ci.cart_id
        WHERE c.user_id = $1
        ORDER BY ci.added_at
        "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart items for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}

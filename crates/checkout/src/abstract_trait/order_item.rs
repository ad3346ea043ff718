use crate::model::order_item::OrderItem as OrderItemModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderItemQueryRepository = Arc<dyn OrderItemQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderItemQueryRepositoryTrait {
    async fn find_by_order(&self, order_id: Uuid)
    -> Result<Vec<OrderItemModel>, RepositoryError>;
}

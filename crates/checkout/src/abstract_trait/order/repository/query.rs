use crate::model::order::Order as OrderModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, RepositoryError>;
}

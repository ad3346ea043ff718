use crate::{
    domain::response::{api::ApiResponse, cart::CartItemResponse},
    model::cart::CartItem as CartItemModel,
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_items_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartItemModel>, RepositoryError>;
}

pub type DynCartQueryService = Arc<dyn CartQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryServiceTrait {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError>;
}

use crate::domain::{
    requests::order::{CancelOrderRequest, CreateOrderRequest, UpdateOrderStatusRequest},
    response::{api::ApiResponse, order::OrderResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn place_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;

    async fn update_order_status(
        &self,
        order_id: Uuid,
        request: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;

    async fn cancel_order(
        &self,
        order_id: Uuid,
        request: &CancelOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}

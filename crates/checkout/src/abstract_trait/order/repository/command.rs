use crate::{
    domain::requests::order::CreateOrderRecord,
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel, status::OrderStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Persists the order, its line items and the matching stock decrements in
    /// one unit of work, then clears the buyer's cart. Either everything lands
    /// or nothing does.
    async fn create_order_with_items(
        &self,
        record: &CreateOrderRecord,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;

    /// Moves the order from `from` to `to` only if it is still in `from`.
    /// Returns `None` when another writer got there first.
    async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderModel>, RepositoryError>;
}

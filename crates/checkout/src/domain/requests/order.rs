use crate::model::status::OrderStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "user_id")]
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "Payment method is required"))]
    #[serde(rename = "payment_method")]
    pub payment_method: String,

    #[validate(length(min = 1, message = "Shipping method is required"))]
    #[serde(rename = "shipping_method")]
    pub shipping_method: String,

    #[validate(length(min = 1, message = "Customer name is required"))]
    #[serde(rename = "customer_name")]
    pub customer_name: String,

    #[validate(email(message = "Invalid email address"))]
    #[serde(rename = "customer_email")]
    pub customer_email: String,

    #[validate(length(min = 1, message = "Customer phone is required"))]
    #[serde(rename = "customer_phone")]
    pub customer_phone: String,

    #[validate(length(min = 1, message = "Shipping address is required"))]
    #[serde(rename = "shipping_address")]
    pub shipping_address: String,

    pub notes: Option<String>,

    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct OrderItemRequest {
    #[serde(rename = "book_id")]
    pub book_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CancelOrderRequest {
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone, IntoParams)]
pub struct FindOrdersQuery {
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
}

/// Fully priced order ready for the atomic commit. Built by the assembler
/// after the pre-check pass; `total_amount` and the line prices are the
/// snapshot that ends up on the persisted rows.
#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub user_id: Uuid,
    pub total_amount: i64,
    pub payment_method: String,
    pub shipping_method: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub lines: Vec<OrderLineRecord>,
}

#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: i64,
}

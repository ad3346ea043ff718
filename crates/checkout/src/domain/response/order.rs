use crate::model::{
    order::Order as OrderModel, order_item::OrderItem as OrderItemModel, status::OrderStatus,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: Uuid,
    #[serde(rename = "book_id")]
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    #[serde(rename = "line_total")]
    pub line_total: i64,
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            book_id: value.book_id,
            line_total: value.price * i64::from(value.quantity),
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
    #[serde(rename = "total_amount")]
    pub total_amount: i64,
    pub status: OrderStatus,
    #[serde(rename = "payment_method")]
    pub payment_method: String,
    #[serde(rename = "shipping_method")]
    pub shipping_method: String,
    #[serde(rename = "customer_name")]
    pub customer_name: String,
    #[serde(rename = "customer_email")]
    pub customer_email: String,
    #[serde(rename = "customer_phone")]
    pub customer_phone: String,
    #[serde(rename = "shipping_address")]
    pub shipping_address: String,
    pub notes: Option<String>,
    pub items: Vec<OrderItemResponse>,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
    #[serde(rename = "shipped_at")]
    pub shipped_at: Option<String>,
    #[serde(rename = "delivered_at")]
    pub delivered_at: Option<String>,
}

// model to response; items joined in by the caller
impl From<(OrderModel, Vec<OrderItemModel>)> for OrderResponse {
    fn from((order, items): (OrderModel, Vec<OrderItemModel>)) -> Self {
        OrderResponse {
            id: order.order_id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            payment_method: order.payment_method,
            shipping_method: order.shipping_method,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            shipping_address: order.shipping_address,
            notes: order.notes,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            shipped_at: order.shipped_at.map(|dt| dt.to_string()),
            delivered_at: order.delivered_at.map(|dt| dt.to_string()),
        }
    }
}

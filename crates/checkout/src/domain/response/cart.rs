use crate::model::cart::CartItem as CartItemModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartItemResponse {
    pub id: Uuid,
    #[serde(rename = "book_id")]
    pub book_id: Uuid,
    pub quantity: i32,
    #[serde(rename = "added_at")]
    pub added_at: String,
}

impl From<CartItemModel> for CartItemResponse {
    fn from(value: CartItemModel) -> Self {
        CartItemResponse {
            id: value.cart_item_id,
            book_id: value.book_id,
            quantity: value.quantity,
            added_at: value.added_at.to_string(),
        }
    }
}

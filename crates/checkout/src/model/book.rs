use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog row. Owned by the catalog surfaces; the checkout core reads
/// `price` and mutates `stock` only through the inventory ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub book_id: Uuid,
    pub title: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

use sqlx::Error as SqlxError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Insufficient stock for book {book_id}: requested={requested}, available={available}")]
    InsufficientStock {
        book_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Custom: {0}")]
    Custom(String),
}

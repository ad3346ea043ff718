use crate::errors::repository::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Insufficient stock for book {book_id}: requested={requested}, available={available}")]
    InsufficientStock {
        book_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Illegal transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

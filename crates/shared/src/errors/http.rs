use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    InsufficientStock(String),
    IllegalTransition(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::InsufficientStock {
                book_id,
                requested,
                available,
            } => HttpError::InsufficientStock(format!(
                "Insufficient stock for book {book_id}: requested={requested}, available={available}"
            )),

            ServiceError::IllegalTransition { from, to } => HttpError::IllegalTransition(format!(
                "Cannot transition order from '{from}' to '{to}'"
            )),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::InsufficientStock {
                    book_id,
                    requested,
                    available,
                } => HttpError::InsufficientStock(format!(
                    "Insufficient stock for book {book_id}: requested={requested}, available={available}"
                )),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                _ => HttpError::Internal("Repository error".into()),
            },

            ServiceError::Internal(msg) | ServiceError::Custom(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, kind, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            HttpError::InsufficientStock(msg) => (StatusCode::CONFLICT, "insufficient_stock", msg),
            HttpError::IllegalTransition(msg) => (StatusCode::CONFLICT, "illegal_transition", msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            kind: kind.into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

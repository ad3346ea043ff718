use crate::model::book::Book as BookModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynBookQueryRepository = Arc<dyn BookQueryRepositoryTrait + Send + Sync>;

/// Catalog lookup consumed by the order assembler: current price and
/// visible stock for one book.
#[async_trait]
pub trait BookQueryRepositoryTrait {
    async fn find_by_id(&self, book_id: Uuid) -> Result<Option<BookModel>, RepositoryError>;
}

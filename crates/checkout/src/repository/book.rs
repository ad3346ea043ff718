use crate::{abstract_trait::book::BookQueryRepositoryTrait, model::book::Book as BookModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;
use uuid::Uuid;

#[derive(Clone)]
pub struct BookQueryRepository {
    db: ConnectionPool,
}

impl BookQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookQueryRepositoryTrait for BookQueryRepository {
    async fn find_by_id(&self, book_id: Uuid) -> Result<Option<BookModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let book = sqlx::query_as::<_, BookModel>(
            r#"
        SELECT book_id, title, price, stock, created_at, updated_at
        FROM books
        WHERE book_id = $1
        "#,
        )
        .bind(book_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch book {}: {:?}", book_id, e);
            RepositoryError::from(e)
        })?;

        Ok(book)
    }
}

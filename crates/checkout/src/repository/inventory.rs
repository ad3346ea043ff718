use shared::errors::RepositoryError;
use sqlx::PgConnection;
use tracing::warn;
use uuid::Uuid;

/// Authoritative stock bookkeeping. Each call locks exactly one book row,
/// checks the requested quantity against what is on hand and decrements it.
pub struct InventoryLedger;

impl InventoryLedger {
    /// Check-and-decrement against a single book row.
    ///
    /// The caller passes the connection of its enclosing transaction. The row
    /// is locked with `FOR UPDATE`, so concurrent reservations against the
    /// same book queue up here and each sees the stock left by the previous
    /// one. Rolling the transaction back undoes the decrement.
    pub async fn reserve(
        conn: &mut PgConnection,
        book_id: Uuid,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let stock =
            sqlx::query_scalar::<_, i32>("SELECT stock FROM books WHERE book_id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        let Some(available) = stock else {
            return Err(RepositoryError::NotFound);
        };

        if quantity > available {
            warn!(
                "🚫 Reservation denied for book {}: requested {}, available {}",
                book_id, quantity, available
            );
            return Err(RepositoryError::InsufficientStock {
                book_id,
                requested: quantity,
                available,
            });
        }

        sqlx::query(
            r#"
        UPDATE books
        SET stock      = stock - $2,
            updated_at = current_timestamp
        WHERE book_id = $1
        "#,
        )
        .bind(book_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(())
    }
}

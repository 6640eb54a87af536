use super::{bounded, FavoriteStore};
use crate::domain::{Item, UserId};
use crate::error::ServiceResult;
use sqlx::PgPool;
use std::time::Duration;

/// Repository for Favorite reads
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
    timeout: Duration,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait::async_trait]
impl FavoriteStore for FavoriteRepository {
    /// Get a window of the user's favorite items.
    ///
    /// `favorite.id` is a surrogate sequence, so ordering by it is insertion
    /// order and stays stable between pages.
    async fn favorite_page(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<Item>> {
        bounded(
            self.timeout,
            "favorite page query",
            sqlx::query_as::<_, Item>(
                r#"
                SELECT items.id, items.user_id, items.first_text, items.last_text, items.status
                FROM favorite
                INNER JOIN items ON items.id = favorite.item_id
                WHERE favorite.user_id = $1
                ORDER BY favorite.id ASC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool),
        )
        .await
    }

    /// Get total favorite count for a user
    async fn favorite_count(&self, user_id: UserId) -> ServiceResult<Option<i64>> {
        bounded(
            self.timeout,
            "favorite count query",
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*) FROM favorite
                WHERE user_id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool),
        )
        .await
    }
}

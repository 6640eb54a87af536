use super::{bounded, VoteLog};
use crate::domain::{ItemId, VoteTally};
use crate::error::ServiceResult;
use sqlx::PgPool;
use std::time::Duration;

/// Repository over the `views` vote log
#[derive(Clone)]
pub struct VoteRepository {
    pool: PgPool,
    timeout: Duration,
}

impl VoteRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait::async_trait]
impl VoteLog for VoteRepository {
    /// Count `left` and `right` votes of an item in one pass.
    ///
    /// Grouping by item means an item without votes yields no row at all.
    async fn tally(&self, item_id: ItemId) -> ServiceResult<Option<VoteTally>> {
        bounded(
            self.timeout,
            "vote tally query",
            sqlx::query_as::<_, VoteTally>(
                r#"
                SELECT
                    COUNT(*) FILTER (WHERE vote = 'left') AS first_vote,
                    COUNT(*) FILTER (WHERE vote = 'right') AS last_vote
                FROM views
                WHERE item_id = $1
                GROUP BY item_id
                "#,
            )
            .bind(item_id)
            .fetch_optional(&self.pool),
        )
        .await
    }
}

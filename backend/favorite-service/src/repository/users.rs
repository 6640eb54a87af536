use super::bounded;
use crate::domain::UserId;
use crate::error::ServiceResult;
use sqlx::PgPool;
use std::time::Duration;

/// Repository for user token lookups
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl UserRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Resolve an API token to its user id
    pub async fn find_user_by_token(&self, token: &str) -> ServiceResult<Option<UserId>> {
        bounded(
            self.timeout,
            "user token query",
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT id FROM users
                WHERE token = $1
                "#,
            )
            .bind(token)
            .fetch_optional(&self.pool),
        )
        .await
    }

    /// Cheap round trip used by the readiness probe
    pub async fn ping(&self) -> ServiceResult<()> {
        bounded(
            self.timeout,
            "readiness query",
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await
        .map(|_| ())
    }
}

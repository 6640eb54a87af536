pub mod favorites;
pub mod users;
pub mod votes;

pub use favorites::FavoriteRepository;
pub use users::UserRepository;
pub use votes::VoteRepository;

use crate::domain::{Item, ItemId, UserId, VoteTally};
use crate::error::{ServiceError, ServiceResult};
use std::future::Future;
use std::time::Duration;

/// Read access to the favorite relation joined with items
#[async_trait::async_trait]
pub trait FavoriteStore: Send + Sync {
    /// One window of the user's favorites, in favorite insertion order
    async fn favorite_page(&self, user_id: UserId, limit: i64, offset: i64)
        -> ServiceResult<Vec<Item>>;

    /// Number of favorite rows of the user; `None` when the aggregate yields no row
    async fn favorite_count(&self, user_id: UserId) -> ServiceResult<Option<i64>>;
}

/// Read access to the append-only vote log
#[async_trait::async_trait]
pub trait VoteLog: Send + Sync {
    /// Aggregate `left`/`right` votes of one item; `None` when the item has no votes
    async fn tally(&self, item_id: ItemId) -> ServiceResult<Option<VoteTally>>;
}

/// Run one database call under a deadline.
///
/// A deadline miss is reported as the database being unavailable.
pub(crate) async fn bounded<T, F>(timeout: Duration, operation: &str, fut: F) -> ServiceResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(unavailable_or_database(e)),
        Err(_) => Err(ServiceError::DatabaseUnavailable(format!(
            "{} timed out after {:?}",
            operation, timeout
        ))),
    }
}

// Connectivity failures are "unavailable", everything else is a plain database error.
fn unavailable_or_database(e: sqlx::Error) -> ServiceError {
    if matches!(
        e,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    ) {
        ServiceError::DatabaseUnavailable(e.to_string())
    } else {
        ServiceError::Database(e)
    }
}

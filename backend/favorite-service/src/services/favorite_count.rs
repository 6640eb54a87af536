use crate::domain::UserId;
use crate::error::ServiceResult;
use crate::repository::FavoriteStore;
use std::sync::Arc;

/// Total number of favorites of a user, for pagination metadata
#[derive(Clone)]
pub struct FavoriteCountEstimator {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteCountEstimator {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// Full count, independent of any page window; a missing row counts as 0
    pub async fn get_total(&self, user_id: UserId) -> ServiceResult<i64> {
        let count = self.store.favorite_count(user_id).await?;
        Ok(count.unwrap_or(0).max(0))
    }
}

use crate::domain::{Item, OrderedItems, Pagination, UserId};
use crate::error::ServiceResult;
use crate::repository::FavoriteStore;
use std::sync::Arc;
use tracing::debug;

/// Reads one page of a user's favorited items
#[derive(Clone)]
pub struct FavoriteReader {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteReader {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// Get the page as an ordered id -> item mapping.
    ///
    /// Out-of-range pagination values are replaced by defaults. An empty
    /// page is a normal result.
    pub async fn get_page(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<OrderedItems<Item>> {
        let page = Pagination::normalize(limit, offset);

        let rows = self
            .store
            .favorite_page(user_id, page.limit, page.offset)
            .await?;

        let items: OrderedItems<Item> = rows
            .into_iter()
            .take(page.limit as usize)
            .map(|item| (item.id, item))
            .collect();

        debug!(
            user_id,
            limit = page.limit,
            offset = page.offset,
            returned = items.len(),
            "Loaded favorite page"
        );
        Ok(items)
    }
}

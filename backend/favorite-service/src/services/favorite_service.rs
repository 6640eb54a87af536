use super::{FavoriteCountEstimator, FavoriteReader, VoteAggregator};
use crate::domain::{FavoriteItemView, FavoritePayload, Pagination, UserId};
use crate::error::ServiceResult;
use tracing::{info, instrument};

/// Assembles the favorite listing: page -> tallies + total -> payload
///
/// Any failing step fails the whole call; there is no partial payload.
/// The page, tallies and total are separate reads, not one snapshot.
#[derive(Clone)]
pub struct FavoriteService {
    reader: FavoriteReader,
    votes: VoteAggregator,
    counter: FavoriteCountEstimator,
}

impl FavoriteService {
    pub fn new(
        reader: FavoriteReader,
        votes: VoteAggregator,
        counter: FavoriteCountEstimator,
    ) -> Self {
        Self {
            reader,
            votes,
            counter,
        }
    }

    pub fn votes(&self) -> &VoteAggregator {
        &self.votes
    }

    #[instrument(skip(self))]
    pub async fn run(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<FavoritePayload> {
        let page = Pagination::normalize(limit, offset);

        let items = self.reader.get_page(user_id, page.limit, page.offset).await?;
        let item_ids = items.ids();

        // Tallies and total share no data; both must succeed before assembly.
        let (tallies, total) = tokio::try_join!(
            self.votes.get_tallies(&item_ids),
            self.counter.get_total(user_id),
        )?;

        let favorite = items.map_values(|item_id, item| {
            let tally = tallies.get(&item_id).copied().unwrap_or_default();
            FavoriteItemView::new(item, tally)
        });

        info!(
            user_id,
            returned = favorite.len(),
            total,
            "Favorite page assembled"
        );
        Ok(FavoritePayload { favorite, total })
    }
}

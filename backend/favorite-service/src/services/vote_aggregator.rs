use crate::cache::VoteCache;
use crate::domain::{ItemId, VoteTally};
use crate::error::{ServiceError, ServiceResult};
use crate::metrics;
use crate::repository::VoteLog;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-through vote tally service
///
/// Architecture:
/// - Get: batched cache lookup (MGET), vote log fallback per missing item
/// - Miss: compute from the log, then write back unconditionally (no TTL)
/// - Cache down: serve everything from the log, skip write-back
/// - Log down: fatal for the caller
///
/// Cached tallies are snapshots. A vote recorded after a tally was cached
/// stays invisible until `refresh_tally` (or another miss path) overwrites
/// the key.
#[derive(Clone)]
pub struct VoteAggregator {
    cache: Arc<dyn VoteCache>,
    log: Arc<dyn VoteLog>,
}

impl VoteAggregator {
    pub fn new(cache: Arc<dyn VoteCache>, log: Arc<dyn VoteLog>) -> Self {
        Self { cache, log }
    }

    /// Get tallies for a set of items.
    ///
    /// Every requested id is present in the result; items without votes map
    /// to a zero tally.
    pub async fn get_tallies(
        &self,
        item_ids: &[ItemId],
    ) -> ServiceResult<HashMap<ItemId, VoteTally>> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let (cached, cache_healthy) = match self.cache.get_many(item_ids).await {
            Ok(values) => (values, true),
            Err(err) => {
                warn!(
                    error = %err,
                    item_count = item_ids.len(),
                    "Vote cache lookup failed, falling back to vote log"
                );
                metrics::record_cache_lookup_error();
                (Vec::new(), false)
            }
        };

        let mut tallies = HashMap::with_capacity(item_ids.len());
        let mut missing = Vec::new();
        for (idx, item_id) in item_ids.iter().enumerate() {
            if tallies.contains_key(item_id) || missing.contains(item_id) {
                continue;
            }
            match cached.get(idx).copied().flatten() {
                Some(tally) => {
                    tallies.insert(*item_id, tally);
                }
                None => missing.push(*item_id),
            }
        }

        if cache_healthy {
            metrics::record_cache_hits(tallies.len());
            metrics::record_cache_misses(missing.len());
        }
        debug!(
            hits = tallies.len(),
            misses = missing.len(),
            "Vote cache lookup complete"
        );

        let computed = try_join_all(
            missing
                .iter()
                .map(|item_id| self.load_and_store(*item_id, cache_healthy)),
        )
        .await?;

        tallies.extend(computed);
        Ok(tallies)
    }

    /// Recompute one item's tally from the log and overwrite its cache entry.
    ///
    /// This is the hook for the vote-write path; a cache failure here is
    /// returned to the caller.
    pub async fn refresh_tally(&self, item_id: ItemId) -> ServiceResult<VoteTally> {
        let tally = self.load_from_log(item_id).await?;

        if let Err(err) = self.cache.set(item_id, &tally).await {
            metrics::record_cache_write(false);
            return Err(ServiceError::CacheUnavailable(err));
        }
        metrics::record_cache_write(true);

        info!(
            item_id,
            first_vote = tally.first_vote,
            last_vote = tally.last_vote,
            "Refreshed vote tally"
        );
        Ok(tally)
    }

    async fn load_from_log(&self, item_id: ItemId) -> ServiceResult<VoteTally> {
        let tally = self.log.tally(item_id).await?;
        Ok(tally.unwrap_or_default())
    }

    async fn load_and_store(
        &self,
        item_id: ItemId,
        write_back: bool,
    ) -> ServiceResult<(ItemId, VoteTally)> {
        let tally = self.load_from_log(item_id).await?;

        if write_back {
            match self.cache.set(item_id, &tally).await {
                Ok(()) => metrics::record_cache_write(true),
                Err(err) => {
                    metrics::record_cache_write(false);
                    warn!(
                        error = %err,
                        item_id,
                        "Failed to write vote tally to cache"
                    );
                }
            }
        }

        Ok((item_id, tally))
    }
}

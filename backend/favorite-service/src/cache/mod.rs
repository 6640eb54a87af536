//! Vote tally cache
//!
//! Holds point-in-time snapshots of per-item vote tallies. Entries never
//! expire; a key only changes when some caller overwrites it.
//!
//! Key format: {prefix}{item_id}
//! Value: JSON object `{"first_vote": n, "last_vote": n}`

mod redis_cache;

pub use redis_cache::RedisVoteCache;

use crate::domain::{ItemId, VoteTally};
use std::time::Duration;
use thiserror::Error;

/// Default key namespace for tally entries
pub const DEFAULT_KEY_PREFIX: &str = "favorite:votes:";

/// Marker some writers store to mean "known absent"; read as a miss
pub const ABSENT_SENTINEL: &str = "__absent__";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache call timed out after {0:?}")]
    Timeout(Duration),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Build the cache key for an item
pub fn tally_key(prefix: &str, item_id: ItemId) -> String {
    format!("{}{}", prefix, item_id)
}

/// Decode a raw cached value.
///
/// `None` for the sentinel and for anything that does not decode to a tally,
/// non-UTF-8 bytes included; callers treat both as a miss.
pub fn decode_tally(raw: &[u8]) -> Option<VoteTally> {
    if raw == ABSENT_SENTINEL.as_bytes() {
        return None;
    }
    serde_json::from_slice::<VoteTally>(raw)
        .ok()
        .filter(|tally| tally.first_vote >= 0 && tally.last_vote >= 0)
}

/// Store for cached vote tallies
#[async_trait::async_trait]
pub trait VoteCache: Send + Sync {
    /// Look up tallies for several items at once.
    ///
    /// The result has one slot per requested id, in request order; `None`
    /// means miss.
    async fn get_many(&self, item_ids: &[ItemId]) -> CacheResult<Vec<Option<VoteTally>>>;

    /// Overwrite the tally of one item (no TTL, last writer wins)
    async fn set(&self, item_id: ItemId, tally: &VoteTally) -> CacheResult<()>;

    /// Liveness probe
    async fn ping(&self) -> CacheResult<()>;
}

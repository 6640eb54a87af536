use super::{decode_tally, tally_key, CacheError, CacheResult, VoteCache};
use crate::domain::{ItemId, VoteTally};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Redis-backed tally cache
///
/// `ConnectionManager` is a cheap handle over one multiplexed connection and
/// reconnects on its own, so every call works on a clone.
#[derive(Clone)]
pub struct RedisVoteCache {
    redis: ConnectionManager,
    prefix: String,
    timeout: Duration,
}

impl RedisVoteCache {
    pub fn new(redis: ConnectionManager, prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
            timeout,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn bounded<T, F>(&self, fut: F) -> CacheResult<T>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(CacheError::Redis),
            Err(_) => Err(CacheError::Timeout(self.timeout)),
        }
    }
}

#[async_trait::async_trait]
impl VoteCache for RedisVoteCache {
    async fn get_many(&self, item_ids: &[ItemId]) -> CacheResult<Vec<Option<VoteTally>>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = item_ids
            .iter()
            .map(|id| tally_key(&self.prefix, *id))
            .collect();

        // Raw bytes, so one non-UTF-8 value is a miss for its slot only
        let mut conn = self.redis.clone();
        let values: Vec<Option<Vec<u8>>> = self
            .bounded(async move {
                redis::cmd("MGET")
                    .arg(&keys)
                    .query_async::<_, Vec<Option<Vec<u8>>>>(&mut conn)
                    .await
            })
            .await?;

        let tallies = item_ids
            .iter()
            .zip(values)
            .map(|(item_id, raw)| {
                raw.and_then(|raw| {
                    let tally = decode_tally(&raw);
                    if tally.is_none() {
                        warn!(item_id, "Undecodable vote tally in cache, treating as miss");
                    }
                    tally
                })
            })
            .collect();

        Ok(tallies)
    }

    async fn set(&self, item_id: ItemId, tally: &VoteTally) -> CacheResult<()> {
        let key = tally_key(&self.prefix, item_id);
        let data = serde_json::to_string(tally)?;

        let mut conn = self.redis.clone();
        self.bounded(async move { conn.set::<_, _, ()>(key, data).await })
            .await
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.redis.clone();
        self.bounded(async move {
            redis::cmd("PING")
                .query_async::<_, String>(&mut conn)
                .await
                .map(|_| ())
        })
        .await
    }
}

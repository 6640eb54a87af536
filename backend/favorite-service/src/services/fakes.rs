//! In-memory stand-ins for the stores, used by unit tests

use crate::cache::{CacheError, CacheResult, VoteCache};
use crate::domain::{Item, ItemId, UserId, VoteTally};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{FavoriteStore, VoteLog};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

fn unreachable_redis() -> CacheError {
    CacheError::Timeout(Duration::from_millis(250))
}

#[derive(Default)]
pub struct FakeVoteCache {
    entries: Mutex<HashMap<ItemId, VoteTally>>,
    unavailable: bool,
    failing_writes: bool,
    set_calls: AtomicUsize,
}

impl FakeVoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, item_id: ItemId, tally: VoteTally) -> Self {
        self.entries.lock().unwrap().insert(item_id, tally);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self.failing_writes = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub fn stored(&self, item_id: ItemId) -> Option<VoteTally> {
        self.entries.lock().unwrap().get(&item_id).copied()
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VoteCache for FakeVoteCache {
    async fn get_many(&self, item_ids: &[ItemId]) -> CacheResult<Vec<Option<VoteTally>>> {
        if self.unavailable {
            return Err(unreachable_redis());
        }
        let entries = self.entries.lock().unwrap();
        Ok(item_ids.iter().map(|id| entries.get(id).copied()).collect())
    }

    async fn set(&self, item_id: ItemId, tally: &VoteTally) -> CacheResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes {
            return Err(unreachable_redis());
        }
        self.entries.lock().unwrap().insert(item_id, *tally);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        if self.unavailable {
            return Err(unreachable_redis());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeVoteLog {
    votes: HashMap<ItemId, Vec<String>>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl FakeVoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_votes(mut self, item_id: ItemId, votes: &[&str]) -> Self {
        self.votes
            .insert(item_id, votes.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VoteLog for FakeVoteLog {
    async fn tally(&self, item_id: ItemId) -> ServiceResult<Option<VoteTally>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ServiceError::DatabaseUnavailable(
                "vote tally query timed out".to_string(),
            ));
        }
        Ok(self.votes.get(&item_id).map(|votes| VoteTally {
            first_vote: votes.iter().filter(|v| *v == "left").count() as i64,
            last_vote: votes.iter().filter(|v| *v == "right").count() as i64,
        }))
    }
}

#[derive(Default)]
pub struct FakeFavoriteStore {
    favorites: HashMap<UserId, Vec<Item>>,
    unavailable: bool,
    count_returns_no_row: bool,
    ignores_limit: bool,
}

impl FakeFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorite(mut self, user_id: UserId, item: Item) -> Self {
        self.favorites.entry(user_id).or_default().push(item);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Return every row past `offset`, like a store with a broken LIMIT
    pub fn ignoring_limit(mut self) -> Self {
        self.ignores_limit = true;
        self
    }

    pub fn count_returns_no_row(mut self) -> Self {
        self.count_returns_no_row = true;
        self
    }

    fn check_available(&self) -> ServiceResult<()> {
        if self.unavailable {
            return Err(ServiceError::DatabaseUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FavoriteStore for FakeFavoriteStore {
    async fn favorite_page(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<Item>> {
        self.check_available()?;
        Ok(self
            .favorites
            .get(&user_id)
            .map(|items| {
                let take = if self.ignores_limit {
                    usize::MAX
                } else {
                    limit as usize
                };
                items
                    .iter()
                    .skip(offset as usize)
                    .take(take)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn favorite_count(&self, user_id: UserId) -> ServiceResult<Option<i64>> {
        self.check_available()?;
        if self.count_returns_no_row {
            return Ok(None);
        }
        Ok(Some(
            self.favorites.get(&user_id).map(Vec::len).unwrap_or(0) as i64,
        ))
    }
}

pub fn item(id: ItemId, owner: UserId) -> Item {
    Item {
        id,
        user_id: owner,
        first_text: format!("first text {}", id),
        last_text: format!("last text {}", id),
        status: 1,
    }
}

#![allow(dead_code)]

use favorite_service::cache::{CacheError, CacheResult, VoteCache};
use favorite_service::domain::{Item, ItemId, UserId, VoteTally};
use favorite_service::error::{ServiceError, ServiceResult};
use favorite_service::handlers::{AppState, ReadinessProbe};
use favorite_service::repository::{FavoriteStore, VoteLog};
use favorite_service::services::{
    Authorizer, FavoriteCountEstimator, FavoriteReader, FavoriteService, VoteAggregator,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USER_TOKEN: &str = "token-user-1";
pub const USER_ID: UserId = 1;

/// Relational store stand-in: favorites, votes and users in one place
#[derive(Default)]
pub struct MemoryDatabase {
    favorites: Mutex<Vec<(UserId, Item)>>,
    votes: Mutex<HashMap<ItemId, Vec<&'static str>>>,
    tokens: HashMap<String, UserId>,
    down: AtomicBool,
    tally_queries: AtomicUsize,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(USER_TOKEN.to_string(), USER_ID);
        Self {
            tokens,
            ..Default::default()
        }
    }

    pub fn favorite(&self, user_id: UserId, item_id: ItemId) {
        self.favorites.lock().unwrap().push((
            user_id,
            Item {
                id: item_id,
                user_id: 100 + item_id,
                first_text: format!("Question {}?", item_id),
                last_text: format!("Answer {}", item_id),
                status: 1,
            },
        ));
    }

    pub fn vote(&self, item_id: ItemId, vote: &'static str) {
        self.votes
            .lock()
            .unwrap()
            .entry(item_id)
            .or_default()
            .push(vote);
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn tally_queries(&self) -> usize {
        self.tally_queries.load(Ordering::SeqCst)
    }

    fn ensure_up(&self) -> ServiceResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ServiceError::DatabaseUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FavoriteStore for MemoryDatabase {
    async fn favorite_page(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<Item>> {
        self.ensure_up()?;
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn favorite_count(&self, user_id: UserId) -> ServiceResult<Option<i64>> {
        self.ensure_up()?;
        let count = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .count();
        Ok(Some(count as i64))
    }
}

#[async_trait::async_trait]
impl VoteLog for MemoryDatabase {
    async fn tally(&self, item_id: ItemId) -> ServiceResult<Option<VoteTally>> {
        self.tally_queries.fetch_add(1, Ordering::SeqCst);
        self.ensure_up()?;
        Ok(self.votes.lock().unwrap().get(&item_id).map(|votes| VoteTally {
            first_vote: votes.iter().filter(|v| **v == "left").count() as i64,
            last_vote: votes.iter().filter(|v| **v == "right").count() as i64,
        }))
    }
}

#[async_trait::async_trait]
impl Authorizer for MemoryDatabase {
    async fn authorize(&self, token: Option<&str>) -> ServiceResult<UserId> {
        let token = token.ok_or_else(|| ServiceError::Unauthorized("missing token".into()))?;
        self.ensure_up()?;
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| ServiceError::Unauthorized("invalid token".into()))
    }
}

#[async_trait::async_trait]
impl ReadinessProbe for MemoryDatabase {
    async fn check(&self) -> ServiceResult<()> {
        self.ensure_up()
    }
}

/// Cache stand-in holding tallies in a map
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<ItemId, VoteTally>>,
    down: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, item_id: ItemId, tally: VoteTally) {
        self.entries.lock().unwrap().insert(item_id, tally);
    }

    pub fn get(&self, item_id: ItemId) -> Option<VoteTally> {
        self.entries.lock().unwrap().get(&item_id).copied()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> CacheResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CacheError::Timeout(Duration::from_millis(250)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl VoteCache for MemoryCache {
    async fn get_many(&self, item_ids: &[ItemId]) -> CacheResult<Vec<Option<VoteTally>>> {
        self.check()?;
        let entries = self.entries.lock().unwrap();
        Ok(item_ids.iter().map(|id| entries.get(id).copied()).collect())
    }

    async fn set(&self, item_id: ItemId, tally: &VoteTally) -> CacheResult<()> {
        self.check()?;
        self.entries.lock().unwrap().insert(item_id, *tally);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check()
    }
}

pub struct Fixture {
    pub db: Arc<MemoryDatabase>,
    pub cache: Arc<MemoryCache>,
    pub state: AppState,
}

pub fn fixture() -> Fixture {
    let db = Arc::new(MemoryDatabase::new());
    let cache = Arc::new(MemoryCache::new());

    let favorites = FavoriteService::new(
        FavoriteReader::new(db.clone()),
        VoteAggregator::new(cache.clone(), db.clone()),
        FavoriteCountEstimator::new(db.clone()),
    );
    let state = AppState::new(favorites, db.clone(), db.clone());

    Fixture { db, cache, state }
}

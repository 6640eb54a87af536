pub mod authorizer;
pub mod favorite_count;
pub mod favorite_reader;
pub mod favorite_service;
pub mod vote_aggregator;

#[cfg(test)]
pub(crate) mod fakes;

pub use authorizer::{bearer_token, Authorizer, PgTokenAuthorizer};
pub use favorite_count::FavoriteCountEstimator;
pub use favorite_reader::FavoriteReader;
pub use favorite_service::FavoriteService;
pub use vote_aggregator::VoteAggregator;

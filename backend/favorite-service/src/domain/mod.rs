pub mod models;
pub mod pagination;

pub use models::{
    FavoriteItemView, FavoritePayload, Item, ItemId, OrderedItems, UserId, VoteTally,
};
pub use pagination::{Pagination, RawPagination};

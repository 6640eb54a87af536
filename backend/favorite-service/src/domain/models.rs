use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Item identity as stored in `items.id`
pub type ItemId = i64;

/// User identity as stored in `users.id`
pub type UserId = i64;

/// Item entity - a favoritable item owned by some user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: ItemId,
    pub user_id: UserId,
    pub first_text: String,
    pub last_text: String,
    pub status: i32,
}

/// Aggregated votes of one item, derived from the `views` log
///
/// `first_vote` counts `left` votes, `last_vote` counts `right` votes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoteTally {
    pub first_vote: i64,
    pub last_vote: i64,
}

/// One entry of the favorite payload: item display fields merged with its tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItemView {
    pub first_text: String,
    pub last_text: String,
    pub status: i32,
    pub first_vote: i64,
    pub last_vote: i64,
}

impl FavoriteItemView {
    pub fn new(item: Item, tally: VoteTally) -> Self {
        Self {
            first_text: item.first_text,
            last_text: item.last_text,
            status: item.status,
            first_vote: tally.first_vote,
            last_vote: tally.last_vote,
        }
    }
}

/// Ordered mapping of item id to value.
///
/// Serializes as a JSON object whose keys keep page order, which a plain
/// `HashMap` would not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedItems<T> {
    entries: Vec<(ItemId, T)>,
}

impl<T> OrderedItems<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert keeping first-seen order; a repeated id replaces the value in place
    pub fn insert(&mut self, id: ItemId, value: T) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, value)| value)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ItemId, T)> {
        self.entries.iter()
    }

    pub fn map_values<U>(self, mut f: impl FnMut(ItemId, T) -> U) -> OrderedItems<U> {
        OrderedItems {
            entries: self
                .entries
                .into_iter()
                .map(|(id, value)| (id, f(id, value)))
                .collect(),
        }
    }
}

impl<T> Default for OrderedItems<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(ItemId, T)> for OrderedItems<T> {
    fn from_iter<I: IntoIterator<Item = (ItemId, T)>>(iter: I) -> Self {
        let mut items = OrderedItems::new();
        for (id, value) in iter {
            items.insert(id, value);
        }
        items
    }
}

impl<T> IntoIterator for OrderedItems<T> {
    type Item = (ItemId, T);
    type IntoIter = std::vec::IntoIter<(ItemId, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for OrderedItems<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(&id.to_string(), value)?;
        }
        map.end()
    }
}

/// Response payload of the favorite read endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePayload {
    pub favorite: OrderedItems<FavoriteItemView>,
    pub total: i64,
}

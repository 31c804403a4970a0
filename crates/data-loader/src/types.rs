//! Core domain types for the recommendation engine.
//!
//! This module defines the in-memory snapshot the engine scores against:
//! - `Catalog`: item identities and their attribute tags
//! - `RatingStore`: one rating vector per user, plus a per-item column index
//! - `DataIndex`: the owned pair of both, one instance per engine
//!
//! Ordered collections (`BTreeMap`, `BTreeSet`) are used wherever iteration
//! order feeds floating-point sums, so repeated calls produce identical bits.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = String;

/// Unique identifier for an item (e.g. a film title)
pub type ItemId = String;

/// Unordered set of genre/attribute tags
pub type TagSet = BTreeSet<String>;

/// A user's ratings keyed by item. Map semantics rule out duplicate items.
///
/// The engine performs no range validation on the values.
pub type RatingVector = BTreeMap<ItemId, f64>;

static EMPTY_TAGS: TagSet = BTreeSet::new();
static EMPTY_RATINGS: RatingVector = BTreeMap::new();
static EMPTY_RATERS: BTreeMap<UserId, f64> = BTreeMap::new();

// =============================================================================
// Item and Catalog
// =============================================================================

/// An item in the catalog together with its tag set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub tags: TagSet,
}

impl Item {
    pub fn new<I, T>(id: impl Into<ItemId>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Item identities and tags, kept in registration order.
///
/// Registration order is what ranking falls back on when scores tie, so an
/// overwritten item keeps the position it was first registered at.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    positions: HashMap<ItemId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, or overwrite the tags of an existing one
    pub fn register_item<I, T>(&mut self, id: impl Into<ItemId>, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.insert_item(Item::new(id, tags));
    }

    /// Insert a prebuilt item (same overwrite rules as `register_item`)
    pub fn insert_item(&mut self, item: Item) {
        match self.positions.get(&item.id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.positions.insert(item.id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    /// Tags of an item, or an empty set if the item is unknown
    pub fn tags_of(&self, id: &str) -> &TagSet {
        self.get_item(id).map(|item| &item.tags).unwrap_or(&EMPTY_TAGS)
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    /// Registration position of an item
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Item ids in registration order. Call again to restart.
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().map(|item| &item.id)
    }

    /// Items in registration order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// RatingStore
// =============================================================================

/// Per-user rating vectors.
///
/// Alongside the user-major map the store keeps an item-major column
/// (`item -> user -> rating`) so co-rating lookups don't scan every user.
/// Both views are updated together on every `set_ratings`.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    user_ratings: BTreeMap<UserId, RatingVector>,
    item_raters: HashMap<ItemId, BTreeMap<UserId, f64>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's full rating vector (last write wins, no merge)
    pub fn set_ratings<I, K>(&mut self, user_id: impl Into<UserId>, ratings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<ItemId>,
    {
        let user_id = user_id.into();
        let ratings: RatingVector = ratings.into_iter().map(|(k, r)| (k.into(), r)).collect();

        if let Some(previous) = self.user_ratings.remove(&user_id) {
            for item_id in previous.keys() {
                if let Some(raters) = self.item_raters.get_mut(item_id) {
                    raters.remove(&user_id);
                    if raters.is_empty() {
                        self.item_raters.remove(item_id);
                    }
                }
            }
        }

        for (item_id, &rating) in &ratings {
            self.item_raters
                .entry(item_id.clone())
                .or_default()
                .insert(user_id.clone(), rating);
        }

        self.user_ratings.insert(user_id, ratings);
    }

    /// A user's rating vector, or an empty vector if the user is unknown
    pub fn ratings_of(&self, user_id: &str) -> &RatingVector {
        self.user_ratings.get(user_id).unwrap_or(&EMPTY_RATINGS)
    }

    /// Every user who rated `item_id`, with their rating, ordered by user id
    pub fn raters_of(&self, item_id: &str) -> &BTreeMap<UserId, f64> {
        self.item_raters.get(item_id).unwrap_or(&EMPTY_RATERS)
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_ratings.contains_key(user_id)
    }

    /// User ids in sorted order. Call again to restart.
    pub fn user_ids(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.user_ratings.keys()
    }

    /// `(user, ratings)` pairs in user id order
    pub fn users(&self) -> impl Iterator<Item = (&UserId, &RatingVector)> + '_ {
        self.user_ratings.iter()
    }

    pub fn user_count(&self) -> usize {
        self.user_ratings.len()
    }

    pub fn rating_count(&self) -> usize {
        self.user_ratings.values().map(|v| v.len()).sum()
    }
}

// =============================================================================
// DataIndex - the owned engine state
// =============================================================================

/// Catalog and ratings held together.
///
/// There are no process-wide singletons: every engine (or test) builds its
/// own index. Mutators take `&mut self`, lookups take `&self`.
#[derive(Debug, Clone, Default)]
pub struct DataIndex {
    pub(crate) catalog: Catalog,
    pub(crate) ratings: RatingStore,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    /// Insert or overwrite an item's tag set
    pub fn register_item<I, T>(&mut self, id: impl Into<ItemId>, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.catalog.register_item(id, tags);
    }

    /// Replace a user's full rating vector
    pub fn set_ratings<I, K>(&mut self, user_id: impl Into<UserId>, ratings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<ItemId>,
    {
        self.ratings.set_ratings(user_id, ratings);
    }

    pub fn tags_of(&self, item_id: &str) -> &TagSet {
        self.catalog.tags_of(item_id)
    }

    pub fn ratings_of(&self, user_id: &str) -> &RatingVector {
        self.ratings.ratings_of(user_id)
    }

    pub fn all_user_ids(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.ratings.user_ids()
    }

    /// Item ids derived from the catalog, in registration order
    pub fn all_item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.catalog.item_ids()
    }

    /// `(users, items, ratings)` counts for logging
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.ratings.user_count(),
            self.catalog.len(),
            self.ratings.rating_count(),
        )
    }
}

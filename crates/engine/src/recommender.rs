//! # Recommender
//!
//! Owns one `DataIndex` and answers recommendation requests against it:
//! 1. Look up the scorer for the requested strategy
//! 2. Score every candidate for the user
//! 3. Rank and truncate to top N
//!
//! Registration takes `&mut self` and recommending takes `&self`, so the
//! borrow checker already keeps writes away from in-flight reads. To share
//! one engine between threads wrap it in `Arc<RwLock<Recommender>>` (or a
//! plain `Arc` once loading is finished).

use std::time::Instant;

use tracing::{debug, info};

use data_loader::{DataIndex, ItemId, UserId};
use scorers::{rank_top_n, ScoredItem, Strategy};

/// Recommendation engine over an owned catalog and rating snapshot
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    data_index: DataIndex,
}

impl Recommender {
    /// Create an engine with an empty catalog and no ratings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an already-built index
    pub fn from_index(data_index: DataIndex) -> Self {
        Self { data_index }
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    /// Give the index back, tearing the engine down
    pub fn into_index(self) -> DataIndex {
        self.data_index
    }

    /// Insert or overwrite an item's tag set
    pub fn register_item<I, T>(&mut self, id: impl Into<ItemId>, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.data_index.register_item(id, tags);
    }

    /// Replace a user's full rating vector
    pub fn set_ratings<I, K>(&mut self, user_id: impl Into<UserId>, ratings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<ItemId>,
    {
        self.data_index.set_ratings(user_id, ratings);
    }

    pub fn recommend_user_based(&self, user_id: &str, top_n: usize) -> Vec<ItemId> {
        self.recommend(Strategy::UserBased, user_id, top_n)
    }

    pub fn recommend_item_based(&self, user_id: &str, top_n: usize) -> Vec<ItemId> {
        self.recommend(Strategy::ItemBased, user_id, top_n)
    }

    pub fn recommend_content_based(&self, user_id: &str, top_n: usize) -> Vec<ItemId> {
        self.recommend(Strategy::ContentBased, user_id, top_n)
    }

    /// Top-N item ids for `user_id` under `strategy`, best first
    pub fn recommend(&self, strategy: Strategy, user_id: &str, top_n: usize) -> Vec<ItemId> {
        self.recommend_scored(strategy, user_id, top_n)
            .into_iter()
            .map(|scored| scored.item_id)
            .collect()
    }

    /// Like `recommend`, but keeps the score behind each position
    pub fn recommend_scored(
        &self,
        strategy: Strategy,
        user_id: &str,
        top_n: usize,
    ) -> Vec<ScoredItem> {
        if top_n == 0 {
            debug!("top_n is 0, skipping {} scoring for {}", strategy, user_id);
            return Vec::new();
        }

        let start_time = Instant::now();
        let scorer = strategy.scorer();

        let scores = scorer.score(&self.data_index, user_id);
        let candidate_count = scores.len();
        let ranked = rank_top_n(scores, self.data_index.catalog(), strategy, top_n);

        info!(
            "{} ranked {} of {} candidates for user {} in {:.2?}",
            scorer.name(),
            ranked.len(),
            candidate_count,
            user_id,
            start_time.elapsed()
        );
        ranked
    }
}

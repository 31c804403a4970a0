//! User-based collaborative filtering
//!
//! "Users whose ratings point the same way as yours rated these items"
//!
//! ## Algorithm
//! 1. Compute `cosine(target, other)` for every other user
//! 2. Drop neighbours with similarity exactly 0.0 (they contribute nothing)
//! 3. For every item a neighbour rated that the target has not:
//!    numerator += similarity · rating, denominator += similarity
//! 4. Score = numerator / denominator; items whose weights cancel to 0.0
//!    are dropped

use crate::similarity::cosine;
use crate::traits::Scorer;
use crate::types::WeightedScore;
use data_loader::{DataIndex, ItemId, RatingVector, UserId};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Scores items through similar users
#[derive(Debug, Clone, Copy, Default)]
pub struct UserBasedScorer;

impl UserBasedScorer {
    /// Non-zero similarities to every other user, in user id order
    fn neighbours<'a>(
        &self,
        index: &'a DataIndex,
        user_id: &str,
        target: &RatingVector,
    ) -> Vec<(f64, &'a RatingVector)> {
        let others: Vec<(&UserId, &RatingVector)> = index
            .ratings()
            .users()
            .filter(|(other, _)| other.as_str() != user_id)
            .collect();

        // Order-preserving collect keeps accumulation below deterministic
        others
            .par_iter()
            .map(|&(_, ratings)| (cosine(target, ratings), ratings))
            .filter(|(similarity, _)| *similarity != 0.0)
            .collect()
    }
}

impl Scorer for UserBasedScorer {
    fn name(&self) -> &str {
        "UserBasedScorer"
    }

    #[instrument(skip(self, index))]
    fn score(&self, index: &DataIndex, user_id: &str) -> HashMap<ItemId, f64> {
        let target = index.ratings_of(user_id);
        let neighbours = self.neighbours(index, user_id, target);
        debug!("Found {} users with non-zero similarity", neighbours.len());

        let mut accumulators: HashMap<ItemId, WeightedScore> = HashMap::new();
        for (similarity, ratings) in &neighbours {
            for (item_id, &rating) in ratings.iter() {
                if target.contains_key(item_id) {
                    continue;
                }
                accumulators
                    .entry(item_id.clone())
                    .or_default()
                    .add(*similarity, rating);
            }
        }

        let scores: HashMap<ItemId, f64> = accumulators
            .into_iter()
            .filter_map(|(item_id, acc)| acc.finish().map(|score| (item_id, score)))
            .collect();

        debug!("Scored {} user-based candidates", scores.len());
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> DataIndex {
        let mut index = DataIndex::new();
        index.register_item("Inception", ["Sci-Fi", "Action"]);
        index.register_item("Avatar", ["Sci-Fi", "Adventure"]);
        index.register_item("Titanic", ["Romance", "Drama"]);
        index.register_item("Matrix", ["Sci-Fi", "Action"]);
        index.register_item("Avengers", ["Action", "Adventure"]);

        index.set_ratings("Alice", [("Inception", 5.0), ("Titanic", 3.0)]);
        index.set_ratings("Bob", [("Inception", 4.0), ("Avatar", 4.0), ("Titanic", 5.0)]);
        index.set_ratings("Charlie", [("Avengers", 5.0), ("Avatar", 3.0), ("Matrix", 4.0)]);
        index
    }

    #[test]
    fn test_zero_similarity_users_are_skipped() {
        let index = create_test_index();
        let scores = UserBasedScorer.score(&index, "Alice");

        // Charlie shares nothing with Alice, so Matrix/Avengers never enter
        assert_eq!(scores.len(), 1);
        assert!((scores["Avatar"] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_average_across_neighbours() {
        let mut index = DataIndex::new();
        index.set_ratings("target", [("a", 4.0)]);
        index.set_ratings("close", [("a", 4.0), ("x", 5.0)]);
        index.set_ratings("far", [("a", 1.0), ("b", 8.0), ("x", 1.0)]);

        let s_close = cosine(index.ratings_of("target"), index.ratings_of("close"));
        let s_far = cosine(index.ratings_of("target"), index.ratings_of("far"));
        let expected_x = (s_close * 5.0 + s_far * 1.0) / (s_close + s_far);

        let scores = UserBasedScorer.score(&index, "target");
        assert!((scores["x"] - expected_x).abs() < 1e-12);
        assert!((scores["b"] - 8.0).abs() < 1e-12);
        assert!(!scores.contains_key("a"));
    }

    #[test]
    fn test_cancelling_weights_are_dropped() {
        let mut index = DataIndex::new();
        index.set_ratings("target", [("a", 1.0), ("b", 1.0)]);
        index.set_ratings("pos", [("a", 1.0), ("b", 1.0), ("x", 5.0)]);
        // Same norm as "pos", opposite direction: the weights sum to exactly 0
        index.set_ratings("neg", [("a", -1.0), ("b", -1.0), ("x", 5.0)]);

        let scores = UserBasedScorer.score(&index, "target");
        assert!(!scores.contains_key("x"));
    }

    #[test]
    fn test_unknown_user() {
        let index = create_test_index();
        assert!(UserBasedScorer.score(&index, "Nobody").is_empty());
    }

    #[test]
    fn test_never_returns_rated_items() {
        let index = create_test_index();
        for user in ["Alice", "Bob", "Charlie"] {
            let rated = index.ratings_of(user);
            let scores = UserBasedScorer.score(&index, user);
            assert!(scores.keys().all(|item| !rated.contains_key(item)));
        }
    }
}

//! Content-based filtering over item tags
//!
//! For every catalog item `c` the target has not rated:
//!   score(c) = Σ over rated items r of tag_similarity(tags(c), tags(r)) · rating(r)
//!
//! No normalisation. Every unrated catalog item gets a score, including
//! 0.0, so zero-overlap items still reach ranking (they just rank last).

use crate::similarity::tag_similarity;
use crate::traits::Scorer;
use data_loader::{DataIndex, ItemId};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Scores catalog items by tag overlap with rated items
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentBasedScorer;

impl Scorer for ContentBasedScorer {
    fn name(&self) -> &str {
        "ContentBasedScorer"
    }

    #[instrument(skip(self, index))]
    fn score(&self, index: &DataIndex, user_id: &str) -> HashMap<ItemId, f64> {
        let target = index.ratings_of(user_id);
        let catalog = index.catalog();

        let candidates: Vec<&ItemId> = catalog
            .item_ids()
            .filter(|item_id| !target.contains_key(*item_id))
            .collect();

        let scores: HashMap<ItemId, f64> = candidates
            .par_iter()
            .map(|&candidate| {
                let tags = catalog.tags_of(candidate);
                // Rated items missing from the catalog have no tags and add 0
                let score = target.iter().fold(0.0, |acc, (rated, &rating)| {
                    acc + tag_similarity(tags, catalog.tags_of(rated)) * rating
                });
                (candidate.clone(), score)
            })
            .collect();

        debug!("Scored {} content-based candidates", scores.len());
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
        index
    }

    #[test]
    fn test_jaccard_weighted_sum() {
        let index = create_test_index();
        let scores = ContentBasedScorer.score(&index, "Alice");

        assert_eq!(scores.len(), 3);
        assert!((scores["Matrix"] - 5.0).abs() < 1e-12);
        assert!((scores["Avatar"] - 5.0 / 3.0).abs() < 1e-12);
        assert!((scores["Avengers"] - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_user_scores_every_item_zero() {
        let index = create_test_index();
        let scores = ContentBasedScorer.score(&index, "Nobody");

        assert_eq!(scores.len(), 5);
        assert!(scores.values().all(|&score| score == 0.0));
    }

    #[test]
    fn test_zero_overlap_items_are_kept() {
        let mut index = create_test_index();
        index.register_item("Documentary", ["Nature"]);

        let scores = ContentBasedScorer.score(&index, "Alice");
        assert_eq!(scores["Documentary"], 0.0);
    }

    #[test]
    fn test_unknown_rated_item_contributes_nothing() {
        let mut index = create_test_index();
        index.set_ratings("Eve", [("Matrix", 4.0), ("Bootleg", 5.0)]);

        let scores = ContentBasedScorer.score(&index, "Eve");
        assert!((scores["Inception"] - 4.0).abs() < 1e-12);
        assert!(!scores.contains_key("Bootleg"));
    }

    #[test]
    fn test_scores_scale_with_ratings() {
        let mut index = create_test_index();
        index.set_ratings("Scaled", [("Inception", 12.5), ("Titanic", 7.5)]);

        let base = ContentBasedScorer.score(&index, "Alice");
        let scaled = ContentBasedScorer.score(&index, "Scaled");
        for (item, score) in &base {
            assert!((scaled[item] - 2.5 * score).abs() < 1e-9, "{}", item);
        }
    }
}

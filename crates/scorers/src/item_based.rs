//! Item-based collaborative filtering
//!
//! "Items rated the same way as the ones you rated"
//!
//! ## Algorithm
//! For every catalog item `c` the target has not rated, and every item `r`
//! the target has rated:
//!   numerator += item_similarity(c, r) · rating(r)
//!   denominator += item_similarity(c, r)
//! Score = numerator / denominator. Candidates whose similarity weights sum
//! to exactly 0.0 are omitted, not scored as zero.

use crate::similarity::item_similarity;
use crate::traits::Scorer;
use crate::types::WeightedScore;
use data_loader::{DataIndex, ItemId};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Scores catalog items through co-rating similarity with rated items
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemBasedScorer;

impl Scorer for ItemBasedScorer {
    fn name(&self) -> &str {
        "ItemBasedScorer"
    }

    #[instrument(skip(self, index))]
    fn score(&self, index: &DataIndex, user_id: &str) -> HashMap<ItemId, f64> {
        let target = index.ratings_of(user_id);
        if target.is_empty() {
            debug!("User has no ratings, nothing to compare against");
            return HashMap::new();
        }

        let store = index.ratings();
        let candidates: Vec<&ItemId> = index
            .all_item_ids()
            .filter(|item_id| !target.contains_key(*item_id))
            .collect();

        let scores: HashMap<ItemId, f64> = candidates
            .par_iter()
            .filter_map(|&candidate| {
                let mut acc = WeightedScore::default();
                for (rated, &rating) in target {
                    acc.add(item_similarity(store, candidate, rated), rating);
                }
                acc.finish().map(|score| (candidate.clone(), score))
            })
            .collect();

        debug!(
            "Scored {} of {} item-based candidates",
            scores.len(),
            candidates.len()
        );
        scores
    }
}

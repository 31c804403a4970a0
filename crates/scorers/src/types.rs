//! Shared types for the scoring strategies.

use crate::content_based::ContentBasedScorer;
use crate::item_based::ItemBasedScorer;
use crate::traits::Scorer;
use crate::user_based::UserBasedScorer;
use data_loader::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which scoring strategy produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Collaborative filtering over similar users
    UserBased,
    /// Collaborative filtering over co-rated items
    ItemBased,
    /// Tag overlap with items the user already rated
    ContentBased,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::UserBased,
        Strategy::ItemBased,
        Strategy::ContentBased,
    ];

    /// The scorer implementing this strategy
    pub fn scorer(self) -> &'static dyn Scorer {
        match self {
            Strategy::UserBased => &UserBasedScorer,
            Strategy::ItemBased => &ItemBasedScorer,
            Strategy::ContentBased => &ContentBasedScorer,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::UserBased => "user",
            Strategy::ItemBased => "item",
            Strategy::ContentBased => "content",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "user-based" | "user_based" => Ok(Strategy::UserBased),
            "item" | "item-based" | "item_based" => Ok(Strategy::ItemBased),
            "content" | "content-based" | "content_based" => Ok(Strategy::ContentBased),
            other => Err(format!(
                "unknown strategy '{}' (expected user, item or content)",
                other
            )),
        }
    }
}

/// A ranked recommendation with the score that placed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: ItemId,
    pub score: f64,
    pub strategy: Strategy,
}

impl ScoredItem {
    pub fn new(item_id: impl Into<ItemId>, score: f64, strategy: Strategy) -> Self {
        Self {
            item_id: item_id.into(),
            score,
            strategy,
        }
    }
}

/// Running weighted average for one candidate item.
///
/// Lives only for the duration of a single scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedScore {
    /// Σ similarity · rating
    pub numerator: f64,
    /// Σ similarity
    pub denominator: f64,
}

impl WeightedScore {
    pub fn add(&mut self, similarity: f64, rating: f64) {
        self.numerator += similarity * rating;
        self.denominator += similarity;
    }

    /// `numerator / denominator`, or `None` when the weights sum to zero
    pub fn finish(self) -> Option<f64> {
        if self.denominator == 0.0 {
            None
        } else {
            Some(self.numerator / self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_score() {
        let mut score = WeightedScore::default();
        score.add(0.5, 4.0);
        score.add(0.25, 2.0);
        assert_eq!(score.finish(), Some(2.5 / 0.75));
    }

    #[test]
    fn test_weighted_score_zero_weight() {
        assert_eq!(WeightedScore::default().finish(), None);

        let mut cancelled = WeightedScore::default();
        cancelled.add(0.5, 4.0);
        cancelled.add(-0.5, 2.0);
        assert_eq!(cancelled.finish(), None);
    }

    #[test]
    fn test_strategy_round_trips_through_display() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_strategy_aliases() {
        assert_eq!("Content-Based".parse::<Strategy>(), Ok(Strategy::ContentBased));
        assert_eq!("item_based".parse::<Strategy>(), Ok(Strategy::ItemBased));
        assert!("hybrid".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_scorer_names() {
        assert_eq!(Strategy::UserBased.scorer().name(), "UserBasedScorer");
        assert_eq!(Strategy::ItemBased.scorer().name(), "ItemBasedScorer");
        assert_eq!(Strategy::ContentBased.scorer().name(), "ContentBasedScorer");
    }
}

//! Core trait for the scoring strategies.

use data_loader::{DataIndex, ItemId};
use std::collections::HashMap;

/// Produces a candidate score for every item worth ranking for a user.
///
/// ## Contract
/// - Scorers are stateless; all data comes from the borrowed `DataIndex`,
///   so one scorer can serve any number of indices and threads.
/// - The returned map never contains an item the target user has rated.
/// - Scoring never fails. Unknown users, unknown items and degenerate
///   similarities all resolve to missing or zero entries.
pub trait Scorer: Send + Sync {
    /// Returns the name of this scorer (for logging/debugging)
    fn name(&self) -> &str;

    /// Score candidate items for `user_id`.
    ///
    /// # Returns
    /// Unordered `item -> score` map; ranking happens in `rank_top_n`
    fn score(&self, index: &DataIndex, user_id: &str) -> HashMap<ItemId, f64>;
}

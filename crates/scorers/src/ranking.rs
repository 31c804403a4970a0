//! Shared top-N ranking.
//!
//! Sort by score descending and truncate. Equal scores fall back to catalog
//! registration order; items the catalog doesn't know go after every
//! cataloged item, ordered by id. The same rule applies to all strategies.

use crate::types::{ScoredItem, Strategy};
use data_loader::{Catalog, ItemId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Rank candidate scores and keep the first `top_n`
pub fn rank_top_n(
    scores: HashMap<ItemId, f64>,
    catalog: &Catalog,
    strategy: Strategy,
    top_n: usize,
) -> Vec<ScoredItem> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(ItemId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| tie_break(catalog, &a.0, &b.0))
    });
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(item_id, score)| ScoredItem::new(item_id, score, strategy))
        .collect()
}

fn tie_break(catalog: &Catalog, a: &str, b: &str) -> Ordering {
    let pos_a = catalog.position(a).unwrap_or(usize::MAX);
    let pos_b = catalog.position(b).unwrap_or(usize::MAX);
    pos_a.cmp(&pos_b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for id in ["Inception", "Avatar", "Titanic", "Matrix", "Avengers"] {
            catalog.register_item(id, Vec::<String>::new());
        }
        catalog
    }

    fn scores(pairs: &[(&str, f64)]) -> HashMap<ItemId, f64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    fn ids(ranked: &[ScoredItem]) -> Vec<&str> {
        ranked.iter().map(|s| s.item_id.as_str()).collect()
    }

    #[test]
    fn test_descending_and_truncated() {
        let ranked = rank_top_n(
            scores(&[("Avatar", 1.0), ("Matrix", 5.0), ("Titanic", 3.0)]),
            &catalog(),
            Strategy::ContentBased,
            2,
        );
        assert_eq!(ids(&ranked), ["Matrix", "Titanic"]);
        assert_eq!(ranked[0].score, 5.0);
        assert_eq!(ranked[0].strategy, Strategy::ContentBased);
    }

    #[test]
    fn test_ties_follow_catalog_order() {
        let ranked = rank_top_n(
            scores(&[("Avengers", 0.0), ("Inception", 0.0), ("Titanic", 0.0), ("Avatar", 0.0)]),
            &catalog(),
            Strategy::ContentBased,
            10,
        );
        assert_eq!(ids(&ranked), ["Inception", "Avatar", "Titanic", "Avengers"]);
    }

    #[test]
    fn test_uncataloged_items_rank_after_ties_by_id() {
        let ranked = rank_top_n(
            scores(&[("zeta", 2.0), ("alpha", 2.0), ("Matrix", 2.0), ("Avatar", 9.0)]),
            &catalog(),
            Strategy::UserBased,
            10,
        );
        assert_eq!(ids(&ranked), ["Avatar", "Matrix", "alpha", "zeta"]);
    }

    #[test]
    fn test_zero_top_n() {
        let ranked = rank_top_n(scores(&[("Matrix", 1.0)]), &catalog(), Strategy::ItemBased, 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_fewer_candidates_than_top_n() {
        let ranked = rank_top_n(scores(&[("Matrix", 1.0)]), &catalog(), Strategy::ItemBased, 5);
        assert_eq!(ranked.len(), 1);
    }
}

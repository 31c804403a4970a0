//! Similarity measures used by the three strategies.
//!
//! All functions are pure and return 0.0 for degenerate input (zero norms,
//! no co-raters, empty tag sets) instead of dividing by zero.

use data_loader::{RatingStore, RatingVector, TagSet};

/// Cosine similarity between two users' rating vectors.
///
/// The numerator is the dot product over the items both users rated, but
/// each norm is taken over that user's *entire* vector. Users who share few
/// items therefore score lower than plain cosine over the overlap would
/// give them. Returns 0.0 when either full norm is zero.
pub fn cosine(a: &RatingVector, b: &RatingVector) -> f64 {
    let norm_a: f64 = a.values().map(|r| r * r).sum();
    let norm_b: f64 = b.values().map(|r| r * r).sum();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(item, ra)| b.get(item).map(|rb| ra * rb))
        .sum();

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Cosine similarity between two items over the users who rated both.
///
/// The paired ratings are collected in user-id order from the store's
/// per-item column, so `item_similarity(x, y)` and `item_similarity(y, x)`
/// perform the same arithmetic. Returns 0.0 when nobody rated both items or
/// when either paired norm is zero.
pub fn item_similarity(store: &RatingStore, x: &str, y: &str) -> f64 {
    let raters_x = store.raters_of(x);
    let raters_y = store.raters_of(y);

    // Walk the shorter column and probe the longer one
    let (short, long) = if raters_x.len() <= raters_y.len() {
        (raters_x, raters_y)
    } else {
        (raters_y, raters_x)
    };

    let mut dot = 0.0;
    let mut norm_short = 0.0;
    let mut norm_long = 0.0;
    let mut paired = 0usize;

    for (user, &rs) in short {
        if let Some(&rl) = long.get(user) {
            dot += rs * rl;
            norm_short += rs * rs;
            norm_long += rl * rl;
            paired += 1;
        }
    }

    if paired == 0 || norm_short == 0.0 || norm_long == 0.0 {
        return 0.0;
    }

    dot / (norm_short.sqrt() * norm_long.sqrt())
}

/// Jaccard similarity of two tag sets: |A ∩ B| / |A ∪ B|.
///
/// Returns 0.0 when both sets are empty.
pub fn tag_similarity(a: &TagSet, b: &TagSet) -> f64 {
    let common = a.intersection(b).count();
    let union = a.len() + b.len() - common;
    if union == 0 {
        return 0.0;
    }
    common as f64 / union as f64
}

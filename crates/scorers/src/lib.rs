//! # Scorers Crate
//!
//! The three recommendation strategies and the similarity measures behind
//! them.
//!
//! ## Components
//!
//! ### User-based (`UserBasedScorer`)
//! Weighted average of other users' ratings, weighted by rating-vector
//! cosine similarity to the target user.
//!
//! ### Item-based (`ItemBasedScorer`)
//! Weighted average of the target's own ratings, weighted by co-rating
//! cosine similarity between each candidate and each rated item.
//!
//! ### Content-based (`ContentBasedScorer`)
//! Raw sum of the target's ratings, weighted by Jaccard similarity of item
//! tag sets.
//!
//! All three implement [`Scorer`], and [`rank_top_n`] turns any of their
//! outputs into an ordered top-N list.
//!
//! ## Example Usage
//!
//! ```
//! use data_loader::DataIndex;
//! use scorers::{rank_top_n, Strategy};
//!
//! let mut index = DataIndex::new();
//! index.register_item("Inception", ["Sci-Fi", "Action"]);
//! index.register_item("Matrix", ["Sci-Fi", "Action"]);
//! index.register_item("Titanic", ["Romance", "Drama"]);
//! index.set_ratings("Alice", [("Inception", 5.0)]);
//!
//! let scores = Strategy::ContentBased.scorer().score(&index, "Alice");
//! let ranked = rank_top_n(scores, index.catalog(), Strategy::ContentBased, 1);
//! assert_eq!(ranked[0].item_id, "Matrix");
//! ```

// Public modules
pub mod types;
pub mod traits;
pub mod similarity;
pub mod user_based;
pub mod item_based;
pub mod content_based;
pub mod ranking;

// Re-export commonly used types
pub use types::{ScoredItem, Strategy, WeightedScore};
pub use traits::Scorer;
pub use similarity::{cosine, item_similarity, tag_similarity};
pub use user_based::UserBasedScorer;
pub use item_based::ItemBasedScorer;
pub use content_based::ContentBasedScorer;
pub use ranking::rank_top_n;

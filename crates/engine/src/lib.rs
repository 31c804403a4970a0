//! Engine crate for the recommendation system.
//!
//! This crate contains the `Recommender`, which owns the catalog and
//! ratings and exposes the library entry points.

pub mod recommender;

pub use recommender::Recommender;
pub use scorers::{ScoredItem, Strategy};

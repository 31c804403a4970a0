//! # Data Loader Crate
//!
//! Holds the in-memory snapshot the recommenders score against, and the
//! ingestion code that fills it.
//!
//! ## Main Components
//!
//! - **types**: `Catalog`, `RatingStore` and the owning `DataIndex`
//! - **parser**: Parse items.dat / ratings.dat into Rust structs
//! - **index**: Build a `DataIndex` from files or a JSON `Snapshot`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```
//! use data_loader::DataIndex;
//!
//! let mut index = DataIndex::new();
//! index.register_item("Inception", ["Sci-Fi", "Action"]);
//! index.set_ratings("Alice", [("Inception", 5.0)]);
//!
//! assert_eq!(index.ratings_of("Alice")["Inception"], 5.0);
//! assert!(index.ratings_of("nobody").is_empty());
//! assert!(index.tags_of("unknown").is_empty());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{IntegrityReport, Snapshot};
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    TagSet,
    RatingVector,
    // Core types
    Item,
    Catalog,
    RatingStore,
    DataIndex,
};

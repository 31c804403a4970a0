//! Building a DataIndex from files and snapshots.
//!
//! - `load_from_files`: items.dat + ratings.dat, parsed in parallel
//! - `load_from_json`: a serialized `Snapshot`
//! - `validate`: report rating references to items missing from the catalog

use crate::error::Result;
use crate::parser::{self, RatingRecord, ITEMS_FILE, RATINGS_FILE};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Serializable form of a whole DataIndex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub ratings: BTreeMap<UserId, RatingVector>,
}

/// Outcome of `DataIndex::validate`
///
/// Dangling references are tolerated by every scorer, so this is a report
/// rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    /// `(user, item)` pairs whose item is not in the catalog
    pub dangling: Vec<(UserId, ItemId)>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

impl DataIndex {
    /// Load a dataset directory containing items.dat and ratings.dat
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let items_path = data_dir.join(ITEMS_FILE);
        let ratings_path = data_dir.join(RATINGS_FILE);

        // Both files are independent, so parse them side by side
        let (items, ratings) = rayon::join(
            || parser::parse_items(&items_path),
            || parser::parse_ratings(&ratings_path),
        );
        let items = items?;
        let ratings = ratings?;

        let mut index = DataIndex::new();
        for item in items {
            index.catalog.insert_item(item);
        }
        for (user_id, vector) in group_by_user(ratings) {
            index.set_ratings(user_id, vector);
        }

        index.log_loaded();
        Ok(index)
    }

    /// Load a JSON snapshot file
    pub fn load_from_json(path: &Path) -> Result<Self> {
        info!("Loading snapshot from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        let index = Self::from_snapshot(snapshot);

        index.log_loaded();
        Ok(index)
    }

    /// Build an index from an in-memory snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut index = DataIndex::new();
        for item in snapshot.items {
            index.catalog.insert_item(item);
        }
        for (user_id, vector) in snapshot.ratings {
            index.set_ratings(user_id, vector);
        }
        index
    }

    /// Copy the index out into its serializable form
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.catalog.items().to_vec(),
            ratings: self
                .ratings
                .users()
                .map(|(user, vector)| (user.clone(), vector.clone()))
                .collect(),
        }
    }

    /// Find rating references to items the catalog doesn't know
    pub fn validate(&self) -> IntegrityReport {
        let catalog = &self.catalog;
        let dangling = self
            .ratings
            .users()
            .flat_map(|(user, vector)| {
                vector
                    .keys()
                    .filter(move |item| !catalog.contains(item))
                    .map(move |item| (user.clone(), item.clone()))
            })
            .collect();

        IntegrityReport { dangling }
    }

    fn log_loaded(&self) {
        let (users, items, ratings) = self.counts();
        info!("Loaded {} users, {} items, {} ratings", users, items, ratings);

        let report = self.validate();
        if !report.is_clean() {
            warn!(
                "{} ratings reference items missing from the catalog; they get no tags",
                report.dangling.len()
            );
        }
    }
}

/// Collapse rating lines into one vector per user (a repeated item keeps the last value)
fn group_by_user(records: Vec<RatingRecord>) -> BTreeMap<UserId, RatingVector> {
    let mut grouped: BTreeMap<UserId, RatingVector> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.user_id)
            .or_default()
            .insert(record.item_id, record.rating);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("data-loader-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_group_by_user_last_write_wins() {
        let records = vec![
            RatingRecord { user_id: "a".into(), item_id: "x".into(), rating: 1.0 },
            RatingRecord { user_id: "b".into(), item_id: "x".into(), rating: 2.0 },
            RatingRecord { user_id: "a".into(), item_id: "x".into(), rating: 4.0 },
        ];
        let grouped = group_by_user(records);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["a"]["x"], 4.0);
        assert_eq!(grouped["b"]["x"], 2.0);
    }

    #[test]
    fn test_load_from_files() {
        let dir = temp_dir("files");
        fs::write(dir.join(ITEMS_FILE), "Inception::Sci-Fi|Action\nTitanic::Romance|Drama\n").unwrap();
        fs::write(
            dir.join(RATINGS_FILE),
            "Alice::Inception::5.0\nAlice::Titanic::3.0\nBob::Ghost::2.0\n",
        )
        .unwrap();

        let index = DataIndex::load_from_files(&dir).unwrap();
        assert_eq!(index.counts(), (2, 2, 3));
        assert_eq!(index.ratings_of("Alice").len(), 2);
        assert_eq!(index.tags_of("Titanic").len(), 2);

        let report = index.validate();
        assert_eq!(report.dangling, vec![("Bob".to_string(), "Ghost".to_string())]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_snapshot_json() {
        let json = r#"{
            "items": [{"id": "Matrix", "tags": ["Sci-Fi", "Action"]}, {"id": "Plain"}],
            "ratings": {"Charlie": {"Matrix": 4.0}}
        }"#;
        let dir = temp_dir("json");
        let path = dir.join("snapshot.json");
        fs::write(&path, json).unwrap();

        let index = DataIndex::load_from_json(&path).unwrap();
        assert_eq!(index.catalog().len(), 2);
        assert!(index.tags_of("Plain").is_empty());
        assert_eq!(index.ratings_of("Charlie")["Matrix"], 4.0);
        assert!(index.validate().is_clean());

        let rebuilt = DataIndex::from_snapshot(index.to_snapshot());
        assert_eq!(rebuilt.to_snapshot(), index.to_snapshot());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_snapshot() {
        let dir = temp_dir("bad-json");
        let path = dir.join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DataIndex::load_from_json(&path).unwrap_err();
        assert!(matches!(err, crate::DataLoadError::SnapshotError(_)));

        fs::remove_dir_all(&dir).unwrap();
    }
}

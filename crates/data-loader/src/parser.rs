//! Parser for the plain-text dataset files.
//!
//! - items.dat: itemId::tag|tag|...
//! - ratings.dat: userId::itemId::rating
//!
//! Blank lines are skipped. Every other malformed line is reported with
//! its file name and 1-based line number.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::path::Path;

/// File name used for items in a dataset directory
pub const ITEMS_FILE: &str = "items.dat";

/// File name used for ratings in a dataset directory
pub const RATINGS_FILE: &str = "ratings.dat";

const FIELD_SEPARATOR: &str = "::";
const TAG_SEPARATOR: char = '|';

/// One line of ratings.dat
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Pull the next `::`-separated field, rejecting missing or blank values
fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    let field = parts
        .next()
        .map(str::trim)
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Missing {}", name),
        })?;

    if field.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Empty {}", name),
        });
    }
    Ok(field)
}

/// Parse the items.dat file
pub fn parse_items(path: &Path) -> Result<Vec<Item>> {
    let content = read_file(path)?;
    parse_items_str(&content, ITEMS_FILE)
}

/// Parse items from already-loaded text
///
/// Format: itemId::tags, where tags are pipe-separated and may be empty
/// ("Matrix::Sci-Fi|Action", "Untagged::").
pub fn parse_items_str(content: &str, file: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.splitn(2, FIELD_SEPARATOR);
        let item_id = next_field(&mut parts, file, line_no, "itemId")?;
        let tags = parts.next().map(parse_tags).unwrap_or_default();

        items.push(Item {
            id: item_id.to_string(),
            tags,
        });
    }

    Ok(items)
}

/// Parse the ratings.dat file
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let content = read_file(path)?;
    parse_ratings_str(&content, RATINGS_FILE)
}

/// Parse ratings from already-loaded text
///
/// Format: userId::itemId::rating
pub fn parse_ratings_str(content: &str, file: &str) -> Result<Vec<RatingRecord>> {
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split(FIELD_SEPARATOR);
        let user_id = next_field(&mut parts, file, line_no, "userId")?;
        let item_id = next_field(&mut parts, file, line_no, "itemId")?;
        let rating_value = next_field(&mut parts, file, line_no, "rating")?;

        if parts.next().is_some() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Unexpected trailing field".to_string(),
            });
        }

        let rating: f64 = rating_value.parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid rating: {}", e),
        })?;

        if !rating.is_finite() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Rating must be finite, got {}", rating_value),
            });
        }

        ratings.push(RatingRecord {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            rating,
        });
    }

    Ok(ratings)
}

/// Split a pipe-separated tag list, dropping blank entries
///
/// Example: "Sci-Fi|Action" -> {"Action", "Sci-Fi"}
fn parse_tags(s: &str) -> TagSet {
    s.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

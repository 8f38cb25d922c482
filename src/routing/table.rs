//! Path records and the redirect table they fold into.
//!
//! # Design Decisions
//! - Exact string match only, O(1) lookup via HashMap
//! - Duplicate paths resolve last-wins, in source order
//! - A table is a snapshot; it never observes later source changes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single path-to-destination entry as it appears in a source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathRecord {
    /// Request path to match (e.g. "/fb").
    pub path: String,

    /// Destination URL. Serialized as `url` in YAML/JSON sources.
    #[serde(rename = "url")]
    pub destination: String,
}

impl PathRecord {
    pub fn new(path: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            destination: destination.into(),
        }
    }
}

/// Lookup table from path to destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the destination for `path`.
    pub fn insert(&mut self, path: impl Into<String>, destination: impl Into<String>) {
        self.entries.insert(path.into(), destination.into());
    }

    /// Destination for `path`, if present.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, destination)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<PathRecord> for RedirectTable {
    fn from_iter<I: IntoIterator<Item = PathRecord>>(iter: I) -> Self {
        build_table(iter)
    }
}

/// Fold records into a table. Later records overwrite earlier ones with the
/// same path.
pub fn build_table<I>(records: I) -> RedirectTable
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut table = RedirectTable::new();
    for record in records {
        table.insert(record.path, record.destination);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty() {
        let table = build_table(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.get("/anything"), None);
    }

    #[test]
    fn test_build_last_wins() {
        let table = build_table(vec![
            PathRecord::new("/a", "https://first.example"),
            PathRecord::new("/b", "https://b.example"),
            PathRecord::new("/a", "https://second.example"),
            PathRecord::new("/a", "https://third.example"),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/a"), Some("https://third.example"));
        assert_eq!(table.get("/b"), Some("https://b.example"));
    }

    #[test]
    fn test_build_contains_exactly_distinct_paths() {
        let records = vec![
            PathRecord::new("/x", "1"),
            PathRecord::new("/y", "2"),
            PathRecord::new("/x", "3"),
            PathRecord::new("/z", "4"),
        ];
        let table: RedirectTable = records.clone().into_iter().collect();

        let mut paths: Vec<&str> = table.iter().map(|(p, _)| p).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["/x", "/y", "/z"]);

        for (path, destination) in table.iter() {
            let last = records.iter().rev().find(|r| r.path == path).unwrap();
            assert_eq!(destination, last.destination);
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = build_table(vec![PathRecord::new("/fb", "https://facebook.com")]);
        assert!(table.contains("/fb"));
        assert!(!table.contains("/fb/"));
        assert!(!table.contains("/FB"));
        assert!(!table.contains("/f"));
    }
}

//! redb-backed path store.
//!
//! # Responsibilities
//! - Own the database handle and the `pathMap` partition
//! - Seed the partition once (populate)
//! - Read the whole partition as a table snapshot
//! - Upsert single entries or batches, all-or-nothing
//!
//! # Design Decisions
//! - One transaction per operation, scoped to the call
//! - No locking here: redb serializes writers and gives readers a snapshot
//! - Operations on a missing partition fail with `Uninitialized` instead of
//!   creating it implicitly

use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, TableDefinition, TableError, TableHandle, WriteTransaction};

use crate::routing::table::RedirectTable;
use crate::store::error::{StoreError, StoreResult};

/// Name of the single partition holding path -> destination entries.
pub const PARTITION: &str = "pathMap";

const PATH_MAP: TableDefinition<&str, &str> = TableDefinition::new(PARTITION);

/// Entries written by the first `populate`.
pub const SEED_PATHS: [(&str, &str); 3] = [
    ("/fb", "https://facebook.com"),
    ("/twtr", "https://twitter.com"),
    ("/ig", "https://instagram.com"),
];

/// Persistent path store on top of a redb database file.
pub struct RedirectStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RedirectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectStore")
            .field("path", &self.path)
            .field("partition", &PARTITION)
            .finish()
    }
}

impl RedirectStore {
    /// Create or open the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(&path)?;
        tracing::debug!(path = ?path, "Store opened");

        Ok(Self { db, path })
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create and seed the partition if it does not exist.
    ///
    /// Returns `true` when the partition was created by this call. Calling it
    /// again is a no-op.
    pub fn populate(&self) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        if partition_exists(&txn)? {
            txn.abort()?;
            return Ok(false);
        }

        {
            let mut table = txn.open_table(PATH_MAP)?;
            for (path, destination) in SEED_PATHS {
                table.insert(path, destination)?;
            }
        }
        txn.commit()?;

        tracing::info!(partition = PARTITION, entries = SEED_PATHS.len(), "Store partition created and seeded");
        Ok(true)
    }

    /// Read every entry in the partition.
    pub fn read_all(&self) -> StoreResult<RedirectTable> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(PATH_MAP) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::Uninitialized { partition: PARTITION })
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = RedirectTable::new();
        for entry in table.iter()? {
            let (path, destination) = entry?;
            paths.insert(path.value(), destination.value());
        }
        Ok(paths)
    }

    /// Insert or overwrite one entry.
    pub fn add_path(&self, path: &str, destination: &str) -> StoreResult<()> {
        self.add_paths([(path, destination)])?;
        Ok(())
    }

    /// Insert or overwrite a batch of entries in one transaction.
    ///
    /// Either every entry is committed or none is. Returns the number of
    /// entries written.
    pub fn add_paths<I, P, D>(&self, entries: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = (P, D)>,
        P: AsRef<str>,
        D: AsRef<str>,
    {
        let txn = self.db.begin_write()?;
        if !partition_exists(&txn)? {
            txn.abort()?;
            return Err(StoreError::Uninitialized { partition: PARTITION });
        }

        let mut written = 0;
        {
            let mut table = txn.open_table(PATH_MAP)?;
            for (path, destination) in entries {
                table.insert(path.as_ref(), destination.as_ref())?;
                written += 1;
            }
        }
        txn.commit()?;

        tracing::debug!(partition = PARTITION, entries = written, "Store entries written");
        Ok(written)
    }
}

fn partition_exists(txn: &WriteTransaction) -> StoreResult<bool> {
    Ok(txn.list_tables()?.any(|table| table.name() == PARTITION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RedirectStore) {
        let dir = TempDir::new().unwrap();
        let store = RedirectStore::open(dir.path().join("pathMap.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_populate_seeds_once() {
        let (_dir, store) = temp_store();

        assert!(store.populate().unwrap());
        let first = store.read_all().unwrap();
        assert_eq!(first.len(), SEED_PATHS.len());
        assert_eq!(first.get("/fb"), Some("https://facebook.com"));

        assert!(!store.populate().unwrap());
        assert_eq!(store.read_all().unwrap(), first);
    }

    #[test]
    fn test_populate_does_not_reset_data() {
        let (_dir, store) = temp_store();
        store.populate().unwrap();
        store.add_path("/fb", "https://fb.example").unwrap();
        store.add_path("/new", "https://new.example").unwrap();

        store.populate().unwrap();
        let table = store.read_all().unwrap();
        assert_eq!(table.get("/fb"), Some("https://fb.example"));
        assert_eq!(table.get("/new"), Some("https://new.example"));
    }

    #[test]
    fn test_read_before_populate() {
        let (_dir, store) = temp_store();
        let err = store.read_all().unwrap_err();
        assert!(matches!(err, StoreError::Uninitialized { partition: "pathMap" }));
    }

    #[test]
    fn test_add_before_populate_writes_nothing() {
        let (_dir, store) = temp_store();
        let err = store
            .add_paths(vec![("/a", "https://a.example"), ("/b", "https://b.example")])
            .unwrap_err();
        assert!(matches!(err, StoreError::Uninitialized { .. }));

        // Populate afterwards sees an absent partition and only seeds.
        assert!(store.populate().unwrap());
        let table = store.read_all().unwrap();
        assert_eq!(table.len(), SEED_PATHS.len());
        assert!(!table.contains("/a"));
    }

    #[test]
    fn test_add_path_then_read() {
        let (_dir, store) = temp_store();
        store.populate().unwrap();

        store.add_path("/gh", "https://github.com").unwrap();
        let table = store.read_all().unwrap();
        assert_eq!(table.get("/gh"), Some("https://github.com"));
        assert_eq!(table.len(), SEED_PATHS.len() + 1);
    }

    #[test]
    fn test_add_path_overwrites() {
        let (_dir, store) = temp_store();
        store.populate().unwrap();

        store.add_path("/twtr", "https://x.com").unwrap();
        let table = store.read_all().unwrap();
        assert_eq!(table.get("/twtr"), Some("https://x.com"));
        assert_eq!(table.len(), SEED_PATHS.len());
    }

    #[test]
    fn test_add_paths_batch() {
        let (_dir, store) = temp_store();
        store.populate().unwrap();

        let written = store
            .add_paths(vec![
                ("/a".to_string(), "https://a.example".to_string()),
                ("/b".to_string(), "https://b.example".to_string()),
                ("/a".to_string(), "https://a2.example".to_string()),
            ])
            .unwrap();
        assert_eq!(written, 3);

        let table = store.read_all().unwrap();
        assert_eq!(table.get("/a"), Some("https://a2.example"));
        assert_eq!(table.get("/b"), Some("https://b.example"));
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("paths.db");

        {
            let store = RedirectStore::open(&file).unwrap();
            store.populate().unwrap();
            store.add_path("/keep", "https://keep.example").unwrap();
        }

        let store = RedirectStore::open(&file).unwrap();
        assert!(!store.populate().unwrap());
        assert_eq!(store.read_all().unwrap().get("/keep"), Some("https://keep.example"));
        assert_eq!(store.path(), file.as_path());
    }
}

//! Sled-backed snapshot store.
//!
//! Snapshots live in one sled tree (`playground`) with two kinds of keys:
//! - `savedFiles`: JSON array of snapshot names in insertion order
//! - `file_<name>`: JSON-serialized source bundle
//!
//! The index and the records are always written in the same transaction so
//! every indexed name has a record and every record is indexed.

use serde::de::DeserializeOwned;
use sled::transaction::{
    ConflictableTransactionError, TransactionError, TransactionResult, TransactionalTree,
};
use sled::Tree;
use tracing::{info, warn};

use crate::error::{PlaygroundError, Result};
use crate::models::SourceBundle;

const SNAPSHOTS_TREE: &str = "playground";
pub const INDEX_KEY: &str = "savedFiles";
pub const RECORD_PREFIX: &str = "file_";

pub fn record_key(name: &str) -> String {
    format!("{}{}", RECORD_PREFIX, name)
}

/// Persistence for named snapshots.
pub trait SnapshotStore {
    /// Write `bundle` under `name`, overwriting an existing snapshot of the
    /// same name. The name appears in the index once.
    fn save(&self, name: &str, bundle: &SourceBundle) -> Result<()>;

    /// `None` when no snapshot has that name.
    fn load(&self, name: &str) -> Result<Option<SourceBundle>>;

    /// Returns false when the name was unknown.
    fn delete(&self, name: &str) -> Result<bool>;

    fn list_names(&self) -> Result<Vec<String>>;
}

// ============================================================================
// Sled Implementation
// ============================================================================

#[derive(Clone)]
pub struct SledSnapshotStore {
    tree: Tree,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub dropped: usize,
    pub recovered: usize,
    pub unchanged: usize,
}

impl SledSnapshotStore {
    pub fn open(db: &sled::Db) -> Result<Self> {
        let tree = db.open_tree(SNAPSHOTS_TREE)?;
        Ok(Self { tree })
    }

    /// Bring the index and the records back in sync: names without a record
    /// are dropped, records missing from the index are appended in key order.
    pub fn reconcile(&self) -> Result<ReconcileStats> {
        let names = self.list_names()?;
        let mut stats = ReconcileStats::default();
        let mut repaired = Vec::with_capacity(names.len());

        for name in names {
            if self.tree.contains_key(record_key(&name))? {
                stats.unchanged += 1;
                repaired.push(name);
            } else {
                stats.dropped += 1;
            }
        }

        for entry in self.tree.scan_prefix(RECORD_PREFIX) {
            let (key, _) = entry?;
            let key = String::from_utf8_lossy(&key);
            let name = &key[RECORD_PREFIX.len()..];
            if !repaired.iter().any(|n| n == name) {
                stats.recovered += 1;
                repaired.push(name.to_string());
            }
        }

        if stats.dropped > 0 || stats.recovered > 0 {
            self.tree.insert(INDEX_KEY, serde_json::to_vec(&repaired)?)?;
            self.tree.flush()?;
        }
        Ok(stats)
    }
}

fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(raw)?)
}

fn read_index(
    tx: &TransactionalTree,
) -> std::result::Result<Vec<String>, ConflictableTransactionError<PlaygroundError>> {
    match tx.get(INDEX_KEY)? {
        Some(raw) => serde_json::from_slice(&raw).map_err(|e| {
            ConflictableTransactionError::Abort(PlaygroundError::CorruptIndex(e.to_string()))
        }),
        None => Ok(Vec::new()),
    }
}

fn write_index(
    tx: &TransactionalTree,
    names: &[String],
) -> std::result::Result<(), ConflictableTransactionError<PlaygroundError>> {
    let raw = serde_json::to_vec(names)
        .map_err(|e| ConflictableTransactionError::Abort(PlaygroundError::Serialization(e)))?;
    tx.insert(INDEX_KEY, raw)?;
    Ok(())
}

fn flatten(err: TransactionError<PlaygroundError>) -> PlaygroundError {
    match err {
        TransactionError::Abort(e) => e,
        TransactionError::Storage(e) => PlaygroundError::Storage(e),
    }
}

impl SnapshotStore for SledSnapshotStore {
    fn save(&self, name: &str, bundle: &SourceBundle) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PlaygroundError::EmptySnapshotName);
        }
        let record = serde_json::to_vec(bundle)?;
        let key = record_key(name);

        let result: TransactionResult<(), PlaygroundError> = self.tree.transaction(|tx| {
            tx.insert(key.as_bytes(), record.clone())?;
            let mut names = read_index(tx)?;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
                write_index(tx, &names)?;
            }
            Ok(())
        });

        if let Err(e) = result {
            let e = flatten(e);
            warn!(name = %name, error = %e, "Failed to save snapshot");
            return Err(e);
        }
        self.tree.flush()?;
        info!(name = %name, "Saved snapshot");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SourceBundle>> {
        match self.tree.get(record_key(name))? {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let key = record_key(name);
        let result: TransactionResult<bool, PlaygroundError> = self.tree.transaction(|tx| {
            let existed = tx.remove(key.as_bytes())?.is_some();
            let mut names = read_index(tx)?;
            let before = names.len();
            names.retain(|n| n != name);
            if names.len() != before {
                write_index(tx, &names)?;
            }
            Ok(existed || names.len() != before)
        });
        let removed = result.map_err(flatten)?;

        if removed {
            self.tree.flush()?;
            info!(name = %name, "Deleted snapshot");
        }
        Ok(removed)
    }

    fn list_names(&self) -> Result<Vec<String>> {
        match self.tree.get(INDEX_KEY)? {
            Some(raw) => serde_json::from_slice(&raw)
                .map_err(|e| PlaygroundError::CorruptIndex(e.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> SledSnapshotStore {
        let db = sled::Config::new().temporary(true).open().unwrap();
        SledSnapshotStore::open(&db).unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store();
        let bundle = SourceBundle::new("<h1>x</h1>", "h1{}", "console.log(1)");
        store.save("first", &bundle).unwrap();
        assert_eq!(store.load("first").unwrap(), Some(bundle));
    }

    #[test]
    fn test_load_unknown_is_none() {
        let store = temp_store();
        assert_eq!(store.load("missing").unwrap(), None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let store = temp_store();
        let bundle = SourceBundle::default();
        assert!(matches!(
            store.save("", &bundle),
            Err(PlaygroundError::EmptySnapshotName)
        ));
        assert!(matches!(
            store.save("   ", &bundle),
            Err(PlaygroundError::EmptySnapshotName)
        ));
        assert!(store.list_names().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_name_overwrites_and_lists_once() {
        let store = temp_store();
        store.save("a", &SourceBundle::new("1", "", "")).unwrap();
        store.save("b", &SourceBundle::default()).unwrap();
        store.save("a", &SourceBundle::new("2", "", "")).unwrap();

        assert_eq!(store.list_names().unwrap(), vec!["a", "b"]);
        assert_eq!(store.load("a").unwrap().unwrap().html, "2");
    }

    #[test]
    fn test_delete_removes_record_and_index_entry() {
        let store = temp_store();
        store.save("a", &SourceBundle::default()).unwrap();
        store.save("b", &SourceBundle::default()).unwrap();

        assert!(store.delete("a").unwrap());
        assert_eq!(store.list_names().unwrap(), vec!["b"]);
        assert_eq!(store.load("a").unwrap(), None);
        assert!(!store.delete("a").unwrap());
    }

    #[test]
    fn test_storage_layout() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledSnapshotStore::open(&db).unwrap();
        store.save("demo", &SourceBundle::new("h", "c", "j")).unwrap();

        let tree = db.open_tree(SNAPSHOTS_TREE).unwrap();
        let index: Vec<String> =
            serde_json::from_slice(&tree.get(INDEX_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(index, vec!["demo"]);
        let record: serde_json::Value =
            serde_json::from_slice(&tree.get("file_demo").unwrap().unwrap()).unwrap();
        assert_eq!(record, serde_json::json!({ "html": "h", "css": "c", "js": "j" }));
    }

    #[test]
    fn test_list_names_has_no_side_effects() {
        let store = temp_store();
        store.save("one", &SourceBundle::default()).unwrap();
        assert_eq!(store.list_names().unwrap(), store.list_names().unwrap());
    }

    #[test]
    fn test_corrupt_index_reported() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledSnapshotStore::open(&db).unwrap();
        db.open_tree(SNAPSHOTS_TREE)
            .unwrap()
            .insert(INDEX_KEY, b"not json".to_vec())
            .unwrap();
        assert!(matches!(
            store.list_names(),
            Err(PlaygroundError::CorruptIndex(_))
        ));
    }

    #[test]
    fn test_reconcile_repairs_drift() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledSnapshotStore::open(&db).unwrap();
        store.save("kept", &SourceBundle::default()).unwrap();

        let tree = db.open_tree(SNAPSHOTS_TREE).unwrap();
        let index = serde_json::to_vec(&["kept", "ghost"]).unwrap();
        tree.insert(INDEX_KEY, index).unwrap();
        let orphan = serde_json::to_vec(&SourceBundle::new("o", "", "")).unwrap();
        tree.insert("file_orphan", orphan).unwrap();

        let stats = store.reconcile().unwrap();
        assert_eq!(
            stats,
            ReconcileStats {
                dropped: 1,
                recovered: 1,
                unchanged: 1
            }
        );
        assert_eq!(store.list_names().unwrap(), vec!["kept", "orphan"]);
        assert_eq!(store.reconcile().unwrap().unchanged, 2);
    }
}

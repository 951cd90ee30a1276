//! File-based statement store for persistent storage.

use crate::error::{StoreError, StoreResult};
use crate::map::StatementMap;
use crate::mutation::Mutation;
use crate::statement::StatementSet;
use crate::store::StatementStore;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    graphs: BTreeMap<String, StatementSet>,
}

/// A file-based statement store.
///
/// The whole store is kept in memory and mirrored to a JSON snapshot on
/// disk. Data survives process restarts.
///
/// # Durability
///
/// Every successful write serializes the new state to a sibling temporary
/// file, syncs it and renames it over the snapshot. A crash mid-write leaves
/// the previous snapshot in place. The in-memory state only changes after
/// the rename succeeded, so a failed write is invisible to readers.
///
/// # Example
///
/// ```no_run
/// use tripod_store::{FileStore, StatementStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("statements.json")).unwrap();
/// let statements = store.query("http://uri", "http://graph").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: RwLock<StatementMap>,
}

impl FileStore {
    /// Opens the snapshot at `path`, or starts empty if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded,
    /// or was written by an unknown snapshot version.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let data = if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let snapshot: Snapshot = serde_json::from_reader(reader)?;
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(StoreError::unavailable(format!(
                    "unsupported snapshot version {} in {}",
                    snapshot.version,
                    path.display()
                )));
            }
            StatementMap::from_graphs(snapshot.graphs)
        } else {
            StatementMap::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data: RwLock::new(data),
        })
    }

    /// Opens a store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the snapshot
    /// cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the total number of statements across all graphs.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.data.read().statement_count()
    }

    fn write(&self, batch: &[Mutation]) -> StoreResult<()> {
        let mut data = self.data.write();
        let mut staged = data.clone();
        staged.apply_all(batch)?;
        self.persist(&staged)?;
        *data = staged;
        Ok(())
    }

    fn persist(&self, map: &StatementMap) -> StoreResult<()> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            graphs: map.to_graphs(),
        };

        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &snapshot)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl StatementStore for FileStore {
    fn insert_or_replace(
        &self,
        subject: &str,
        graph: &str,
        statements: &StatementSet,
    ) -> StoreResult<()> {
        self.write(&[Mutation::replace(subject, graph, statements.clone())])
    }

    fn delete(&self, subject: &str, graph: &str) -> StoreResult<()> {
        self.write(&[Mutation::delete(subject, graph)])
    }

    fn query(&self, subject: &str, graph: &str) -> StoreResult<StatementSet> {
        Ok(self.data.read().get(subject, graph))
    }

    fn apply_batch(&self, batch: &[Mutation]) -> StoreResult<()> {
        self.write(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Statement, Term};
    use tempfile::tempdir;

    fn person(subject: &str, object: &str) -> StatementSet {
        let mut set = StatementSet::new();
        set.insert(Statement::new(subject, "http://pred", Term::iri(object)));
        set
    }

    #[test]
    fn file_open_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("store.json")).unwrap();
        assert_eq!(store.statement_count(), 0);
    }

    #[test]
    fn file_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).unwrap();
            store
                .insert_or_replace("http://uri", "http://graph", &person("http://uri", "http://obj"))
                .unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.query("http://uri", "http://graph").unwrap(),
            person("http://uri", "http://obj")
        );
    }

    #[test]
    fn file_create_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("store.json");

        let store = FileStore::open_with_create_dirs(&path).unwrap();
        store.delete("http://uri", "http://graph").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_batch_persists_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store
            .apply_batch(&[
                Mutation::replace("http://a", "http://graph", person("http://a", "http://one")),
                Mutation::replace("http://b", "http://graph", person("http://b", "http://two")),
                Mutation::delete("http://a", "http://graph"),
            ])
            .unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert!(store.query("http://a", "http://graph").unwrap().is_empty());
        assert_eq!(store.query("http://b", "http://graph").unwrap().len(), 1);
    }

    #[test]
    fn file_rejected_batch_leaves_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store
            .insert_or_replace("http://a", "http://graph", &person("http://a", "http://one"))
            .unwrap();

        let result = store.apply_batch(&[
            Mutation::delete("http://a", "http://graph"),
            Mutation::delete("http://b", " "),
        ]);
        assert!(result.is_err());
        assert_eq!(store.statement_count(), 1);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.statement_count(), 1);
    }

    #[test]
    fn file_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"version":99,"graphs":{}}"#).unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Unavailable(_))
        ));
    }
}

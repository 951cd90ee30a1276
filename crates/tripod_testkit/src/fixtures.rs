//! Test fixtures and repository helpers.
//!
//! Provides the two people the persistence tests revolve around: one that
//! exists only in memory and one already saved to the store.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tripod_core::{Config, Repository, Resource, WriteTarget};
use tripod_store::{FileStore, InMemoryStore, Statement, StatementSet, StatementStore, Term};

/// Graph every fixture person lives in.
pub const GRAPH: &str = "http://graph";

/// URI of the person that starts out unsaved.
pub const UNSAVED_URI: &str = "http://uri";

/// URI of the person that starts out saved.
pub const SAVED_URI: &str = "http://uri2";

/// A repository over a fresh store with automatic cleanup.
pub struct TestRepository {
    /// The repository instance.
    pub repo: Repository,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestRepository {
    /// Creates a repository over a new in-memory store.
    pub fn memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// Creates a repository over a new file store in a temp directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(&temp_dir.path().join("statements.json"))
            .expect("Failed to open file store");

        Self {
            repo: Repository::with_config(Arc::new(store), fixture_config()),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Creates a repository over the given store.
    pub fn with_store(store: Arc<dyn StatementStore>) -> Self {
        Self {
            repo: Repository::with_config(store, fixture_config()),
            _temp_dir: None,
        }
    }

    /// Returns the snapshot path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir
            .as_ref()
            .map(|d| d.path().join("statements.json"))
    }

    /// Queries the store directly, bypassing the repository.
    pub fn stored(&self, uri: &str) -> StatementSet {
        self.repo
            .store()
            .query(uri, GRAPH)
            .expect("Failed to query store")
    }
}

impl std::ops::Deref for TestRepository {
    type Target = Repository;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

/// Configuration used by every fixture repository.
pub fn fixture_config() -> Config {
    Config::new().default_graph_uri(GRAPH)
}

/// Builds a one-statement set `<subject> <predicate> <object>`.
pub fn single_statement(subject: &str, predicate: &str, object: &str) -> StatementSet {
    let mut set = StatementSet::new();
    set.insert(Statement::new(subject, predicate, Term::iri(object)));
    set
}

/// A person hydrated from `<http://uri> <http://pred> <http://obj>`, not saved.
pub fn unsaved_person() -> Resource {
    let mut person = Resource::new(UNSAVED_URI, GRAPH);
    person.hydrate_from(&single_statement(UNSAVED_URI, "http://pred", "http://obj"));
    person
}

/// A person with `<http://uri2> <http://pred2> <http://obj2>`, saved directly.
pub fn saved_person(repo: &Repository) -> Resource {
    let mut person = Resource::new(SAVED_URI, GRAPH);
    person.hydrate_from(&single_statement(SAVED_URI, "http://pred2", "http://obj2"));
    let saved = repo
        .save(&mut person, WriteTarget::Immediate)
        .expect("Failed to save fixture person");
    assert!(saved, "fixture person should be valid");
    person
}

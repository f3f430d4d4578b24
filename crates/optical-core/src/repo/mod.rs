//! Storage backends for record collections.
//!
//! Every collection sits behind a [`Repository`], so the store never knows
//! whether records live in process memory or in SQLite.

mod memory;
mod schema;
mod sqlite;

pub use memory::{MemoryBackend, MemoryRepository};
pub use schema::SCHEMA;
pub use sqlite::{
    open_connection, open_memory_connection, SharedConnection, SqliteBackend, SqliteRepository,
};

use std::sync::PoisonError;

use thiserror::Error;

use crate::record::Record;

/// Repository errors.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<PoisonError<T>> for RepoError {
    fn from(e: PoisonError<T>) -> Self {
        RepoError::Poisoned(e.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// One collection of records, keyed by [`Record::key`].
///
/// Implementations serialize their own mutations; callers never need an
/// outer lock.
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> RepoResult<Vec<T>>;

    /// Look up a record by canonical key.
    fn find(&self, key: &str) -> RepoResult<Option<T>>;

    /// Append a record. Fails with [`RepoError::Duplicate`] if the key is taken.
    /// Counter-derived ids push the counter past themselves.
    fn insert(&self, record: &T) -> RepoResult<()>;

    /// Atomically modify a record in place. Returns the new value, or `None`
    /// if no record has this key.
    fn update_with(&self, key: &str, apply: &mut dyn FnMut(&mut T)) -> RepoResult<Option<T>>;

    /// Remove and return a record.
    fn remove(&self, key: &str) -> RepoResult<Option<T>>;

    /// Draw the next counter value. Counters never move backwards, not even
    /// when records are removed.
    fn next_sequence(&self) -> RepoResult<u64>;

    /// Number of records.
    fn count(&self) -> RepoResult<usize> {
        Ok(self.list()?.len())
    }
}

/// Produces one repository per collection; the store is built from one of these.
pub trait Backend {
    fn repository<T: Record>(&self) -> Box<dyn Repository<T>>;
}

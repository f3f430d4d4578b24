//! SQLite-backed collections. Records are stored as JSON documents.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction};

use super::{Backend, RepoError, RepoResult, Repository, SCHEMA};
use crate::record::Record;

/// Connection shared by every collection of one store.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open database at path, creating it and the schema if needed.
pub fn open_connection<P: AsRef<Path>>(path: P) -> RepoResult<SharedConnection> {
    let conn = Connection::open(path)?;
    initialize(conn)
}

/// Create an in-memory database (for testing).
pub fn open_memory_connection() -> RepoResult<SharedConnection> {
    let conn = Connection::open_in_memory()?;
    initialize(conn)
}

fn initialize(conn: Connection) -> RepoResult<SharedConnection> {
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// One collection (`kind`) inside the shared `records` table.
pub struct SqliteRepository<T> {
    conn: SharedConnection,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRepository<T> {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }
}

fn load_payload(tx: &Transaction<'_>, kind: &str, key: &str) -> RepoResult<Option<String>> {
    tx.query_row(
        "SELECT payload FROM records WHERE kind = ?1 AND key = ?2",
        params![kind, key],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

impl<T: Record> Repository<T> for SqliteRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        let conn = self.conn.lock()?;
        let mut stmt =
            conn.prepare("SELECT payload FROM records WHERE kind = ?1 ORDER BY seq")?;

        let rows = stmt.query_map([T::KIND], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for payload in rows {
            records.push(serde_json::from_str(&payload?)?);
        }
        Ok(records)
    }

    fn find(&self, key: &str) -> RepoResult<Option<T>> {
        let conn = self.conn.lock()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM records WHERE kind = ?1 AND key = ?2",
                params![T::KIND, key],
                |row| row.get(0),
            )
            .optional()?;

        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(Into::into)
    }

    fn insert(&self, record: &T) -> RepoResult<()> {
        let key = record.key();
        let payload = serde_json::to_string(record)?;

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        match tx.execute(
            "INSERT INTO records (kind, key, payload) VALUES (?1, ?2, ?3)",
            params![T::KIND, key, payload],
        ) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(RepoError::Duplicate(key)),
            Err(e) => return Err(e.into()),
        }

        if let Some(sequence) = record.sequence() {
            let floor = i64::try_from(sequence.saturating_add(1)).unwrap_or(i64::MAX);
            tx.execute(
                r#"
                INSERT INTO sequences (kind, next_value) VALUES (?1, ?2)
                ON CONFLICT(kind) DO UPDATE SET next_value = MAX(next_value, excluded.next_value)
                "#,
                params![T::KIND, floor],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn update_with(&self, key: &str, apply: &mut dyn FnMut(&mut T)) -> RepoResult<Option<T>> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let Some(payload) = load_payload(&tx, T::KIND, key)? else {
            return Ok(None);
        };

        let mut record: T = serde_json::from_str(&payload)?;
        apply(&mut record);

        tx.execute(
            r#"
            UPDATE records SET payload = ?3, updated_at = datetime('now')
            WHERE kind = ?1 AND key = ?2
            "#,
            params![T::KIND, key, serde_json::to_string(&record)?],
        )?;

        tx.commit()?;
        Ok(Some(record))
    }

    fn remove(&self, key: &str) -> RepoResult<Option<T>> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let Some(payload) = load_payload(&tx, T::KIND, key)? else {
            return Ok(None);
        };
        let record: T = serde_json::from_str(&payload)?;

        tx.execute(
            "DELETE FROM records WHERE kind = ?1 AND key = ?2",
            params![T::KIND, key],
        )?;

        tx.commit()?;
        Ok(Some(record))
    }

    fn next_sequence(&self) -> RepoResult<u64> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT OR IGNORE INTO sequences (kind, next_value) VALUES (?1, 1)",
            [T::KIND],
        )?;
        let value: i64 = tx.query_row(
            "SELECT next_value FROM sequences WHERE kind = ?1",
            [T::KIND],
            |row| row.get(0),
        )?;
        tx.execute(
            "UPDATE sequences SET next_value = next_value + 1 WHERE kind = ?1",
            [T::KIND],
        )?;

        tx.commit()?;
        Ok(u64::try_from(value).unwrap_or(1))
    }

    fn count(&self) -> RepoResult<usize> {
        let conn = self.conn.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE kind = ?1",
            [T::KIND],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// Backend storing every collection in one SQLite database.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: SharedConnection,
}

impl SqliteBackend {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl Backend for SqliteBackend {
    fn repository<T: Record>(&self) -> Box<dyn Repository<T>> {
        Box::new(SqliteRepository::<T>::new(Arc::clone(&self.conn)))
    }
}

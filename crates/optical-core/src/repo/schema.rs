//! SQLite schema for the record store.

/// Complete database schema. Safe to apply to an existing database.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Records
-- ============================================================================

-- One row per record; `seq` preserves insertion order across updates.
CREATE TABLE IF NOT EXISTS records (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,                          -- collection name, e.g. 'customers'
    key TEXT NOT NULL,                           -- canonical id
    payload TEXT NOT NULL,                       -- JSON document
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (kind, key)
);

CREATE INDEX IF NOT EXISTS idx_records_kind_seq ON records(kind, seq);

-- ============================================================================
-- Counters
-- ============================================================================

-- Next value handed out per collection. Only ever moves forward.
CREATE TABLE IF NOT EXISTS sequences (
    kind TEXT PRIMARY KEY,
    next_value INTEGER NOT NULL DEFAULT 1 CHECK (next_value >= 1)
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO records (kind, key, payload) VALUES ('products', 'SKU1', '{}')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO records (kind, key, payload) VALUES ('products', 'SKU1', '{}')",
            [],
        );
        assert!(result.is_err());

        // Same key in another collection is fine
        let result = conn.execute(
            "INSERT INTO records (kind, key, payload) VALUES ('shops', 'SKU1', '{}')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_sequence_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO sequences (kind, next_value) VALUES ('customers', 0)",
            [],
        );
        assert!(result.is_err());
    }
}

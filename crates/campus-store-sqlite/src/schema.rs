//! SQL schema for the campus SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. The implicit rowid gives insertion order.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,   -- e.g. 'contacts', 'academic-resources'
    doc_id      TEXT NOT NULL,
    body        TEXT NOT NULL,   -- JSON object, store-owned keys excluded
    created_at  TEXT,            -- RFC 3339 UTC; NULL on imported legacy rows
    updated_at  TEXT,
    PRIMARY KEY (collection, doc_id)
);

CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents(collection);

PRAGMA user_version = 1;
";

//! SQL schema for the Leadline SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// One row per lead; notes and emails are embedded JSON arrays on the row
/// rather than separate tables, mirroring the single-collection document
/// layout. Both arrays only ever grow, via `json_insert` appends.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS leads (
    lead_id    TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL UNIQUE,
    phone      TEXT UNIQUE,             -- NULL when absent; NULLs don't collide
    company    TEXT NOT NULL,
    linked_in  TEXT NOT NULL,
    status     TEXT NOT NULL DEFAULT 'new',
    tags       TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    notes      TEXT NOT NULL DEFAULT '[]',  -- JSON array of Note
    emails     TEXT NOT NULL DEFAULT '[]',  -- JSON array of EmailRecord
    created_at TEXT NOT NULL,               -- ISO 8601 UTC; server-assigned
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS leads_status_idx  ON leads(status);
CREATE INDEX IF NOT EXISTS leads_created_idx ON leads(created_at);

PRAGMA user_version = 1;
";

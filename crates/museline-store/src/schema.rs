//! SQLite schema
//!
//! One table per source collection with the key as primary key, plus the
//! append-only `ingest_state` table whose latest row per source is the
//! authoritative resume cursor.

pub const DDL: &str = "
CREATE TABLE IF NOT EXISTS artworks (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    artist      TEXT NOT NULL,
    medium      TEXT NOT NULL,
    department  TEXT NOT NULL,
    source_page INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS periods (
    id           INTEGER PRIMARY KEY,
    object_count INTEGER NOT NULL,
    name         TEXT NOT NULL,
    source_page  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS classifications (
    id           INTEGER PRIMARY KEY,
    object_count INTEGER NOT NULL,
    name         TEXT NOT NULL,
    source_page  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS departments (
    id           INTEGER PRIMARY KEY,
    display_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ingest_state (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    source     TEXT NOT NULL,
    cursor     INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ingest_state_source ON ingest_state (source, id);
";

//! Scoped SQLite store handle
//!
//! Opened per run and dropped on every exit path; nothing holds a
//! module-global connection. All inserts are `INSERT OR IGNORE`, so a
//! key that already exists is a silent skip, never an error.

use std::path::Path;

use anyhow::{Context, Result};
use museline_core::CursorStore;
use museline_harvard::{CategoryRecord, Resource};
use museline_met::{Artwork, Department};
use rusqlite::{Connection, OptionalExtension, params};

use crate::schema;

pub struct Store {
    conn: Connection,
}

/// Latest cursor row for one source.
#[derive(Debug)]
pub struct CursorEntry {
    pub source: String,
    pub cursor: u64,
    pub updated_at: String,
}

impl Store {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("cannot open database {}", path.display()))?;
        Self::bootstrap(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("cannot open in-memory database")?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::DDL)
            .context("cannot create schema")?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert an artwork unless its key is already present.
    /// Returns whether the row was new.
    pub fn insert_artwork(&self, artwork: &Artwork) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO artworks (id, title, artist, medium, department, source_page)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    artwork.id,
                    artwork.title,
                    artwork.artist,
                    artwork.medium,
                    artwork.department,
                    artwork.source_page,
                ],
            )
            .with_context(|| format!("cannot insert artwork {}", artwork.id))?;
        Ok(changed > 0)
    }

    /// Insert a category record into its resource's table unless the key
    /// is already present. Returns whether the row was new.
    pub fn insert_category(&self, resource: Resource, record: &CategoryRecord) -> Result<bool> {
        // Table name comes from the enum, never from input.
        let sql = format!(
            "INSERT OR IGNORE INTO {} (id, object_count, name, source_page)
             VALUES (?1, ?2, ?3, ?4)",
            resource.table()
        );
        let changed = self
            .conn
            .execute(
                &sql,
                params![
                    record.id,
                    record.object_count,
                    record.name,
                    record.source_page
                ],
            )
            .with_context(|| format!("cannot insert {} {}", resource, record.id))?;
        Ok(changed > 0)
    }

    /// Replace the departments table wholesale (the listing is small and
    /// unpaginated, so it is refreshed rather than ingested).
    pub fn replace_departments(&mut self, departments: &[Department]) -> Result<()> {
        let tx = self.conn.transaction().context("cannot begin transaction")?;
        tx.execute("DELETE FROM departments", [])?;
        for dept in departments {
            tx.execute(
                "INSERT INTO departments (id, display_name) VALUES (?1, ?2)",
                params![dept.id, dept.display_name],
            )?;
        }
        tx.commit().context("cannot commit departments")?;
        log::info!("departments refreshed: {} rows", departments.len());
        Ok(())
    }

    pub fn row_count(&self, table: &str) -> Result<u64> {
        anyhow::ensure!(
            ["artworks", "periods", "classifications", "departments"].contains(&table),
            "unknown table: {table}"
        );
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    /// Latest cursor per source, for status display.
    pub fn cursors(&self) -> Result<Vec<CursorEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT source, cursor, updated_at
             FROM ingest_state s
             WHERE id = (SELECT MAX(id) FROM ingest_state WHERE source = s.source)
             ORDER BY source",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CursorEntry {
                source: row.get(0)?,
                cursor: row.get::<_, i64>(1)? as u64,
                updated_at: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>()
            .context("cannot read cursors")
    }
}

impl CursorStore for Store {
    fn load_cursor(&self, source: &str) -> Result<u64> {
        let cursor: Option<i64> = self
            .conn
            .query_row(
                "SELECT cursor FROM ingest_state WHERE source = ?1 ORDER BY id DESC LIMIT 1",
                params![source],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("cannot load cursor for {source}"))?;
        Ok(cursor.unwrap_or(0) as u64)
    }

    fn save_cursor(&self, source: &str, cursor: u64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO ingest_state (source, cursor, updated_at) VALUES (?1, ?2, ?3)",
                params![source, cursor, chrono::Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("cannot save cursor for {source}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(id: u64, medium: &str, department: &str) -> Artwork {
        Artwork {
            id,
            title: format!("work {id}"),
            artist: "anonymous".to_string(),
            medium: medium.to_string(),
            department: department.to_string(),
            source_page: 1,
        }
    }

    fn category(id: u64, name: &str, count: i64) -> CategoryRecord {
        CategoryRecord {
            id,
            object_count: count,
            name: name.to_string(),
            source_page: 1,
        }
    }

    #[test]
    fn insert_artwork_dedupes_by_key() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.insert_artwork(&artwork(1, "Oil", "Paintings")).unwrap());
        // Second insert with the same key is a no-op, even with other
        // fields changed.
        assert!(!store.insert_artwork(&artwork(1, "Bronze", "Sculpture")).unwrap());
        assert_eq!(store.row_count("artworks").unwrap(), 1);
    }

    #[test]
    fn categories_go_to_their_resource_table() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_category(Resource::Period, &category(1, "Edo", 12))
            .unwrap();
        store
            .insert_category(Resource::Classification, &category(1, "Prints", 30))
            .unwrap();
        // Same key, different tables: both rows exist.
        assert_eq!(store.row_count("periods").unwrap(), 1);
        assert_eq!(store.row_count("classifications").unwrap(), 1);
    }

    #[test]
    fn insert_category_dedupes_by_key() {
        let store = Store::open_in_memory().unwrap();
        assert!(store
            .insert_category(Resource::Period, &category(7, "Meiji", 8))
            .unwrap());
        assert!(!store
            .insert_category(Resource::Period, &category(7, "Meiji", 999))
            .unwrap());
        assert_eq!(store.row_count("periods").unwrap(), 1);
    }

    #[test]
    fn cursor_defaults_to_zero() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.load_cursor("met").unwrap(), 0);
    }

    #[test]
    fn cursors_are_independent_per_source() {
        let store = Store::open_in_memory().unwrap();
        store.save_cursor("met", 50).unwrap();
        store.save_cursor("harvard.period", 200).unwrap();
        assert_eq!(store.load_cursor("met").unwrap(), 50);
        assert_eq!(store.load_cursor("harvard.period").unwrap(), 200);
        assert_eq!(store.load_cursor("harvard.classification").unwrap(), 0);
    }

    #[test]
    fn latest_cursor_row_wins() {
        let store = Store::open_in_memory().unwrap();
        store.save_cursor("met", 25).unwrap();
        store.save_cursor("met", 50).unwrap();
        store.save_cursor("met", 75).unwrap();
        assert_eq!(store.load_cursor("met").unwrap(), 75);

        let entries = store.cursors().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cursor, 75);
    }

    #[test]
    fn replace_departments_is_wholesale() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .replace_departments(&[Department {
                id: 1,
                display_name: "Old".to_string(),
            }])
            .unwrap();
        store
            .replace_departments(&[
                Department {
                    id: 11,
                    display_name: "European Paintings".to_string(),
                },
                Department {
                    id: 12,
                    display_name: "Sculpture".to_string(),
                },
            ])
            .unwrap();
        assert_eq!(store.row_count("departments").unwrap(), 2);
    }

    #[test]
    fn row_count_rejects_unknown_table() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.row_count("ingest_state; DROP TABLE artworks").is_err());
    }
}

//! Grouped-count queries
//!
//! Pure reads over the persisted records; no mutation, deterministic
//! given the stored data. Bucket collapsing and rendering live in the
//! report crate.

use anyhow::{Context, Result};
use rusqlite::params_from_iter;

use crate::store::Store;

/// A labeled count, the unit every report is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Artwork count per curatorial department (join against the refreshed
/// departments table).
#[derive(Debug, Clone)]
pub struct DepartmentCount {
    pub id: u64,
    pub display_name: String,
    pub artworks: i64,
}

impl Store {
    /// Number of artworks per medium, most common first.
    pub fn medium_counts(&self) -> Result<Vec<CategoryCount>> {
        self.grouped(
            "SELECT medium, COUNT(*) AS n FROM artworks GROUP BY medium ORDER BY n DESC, medium",
        )
    }

    /// Periods with the most objects, largest first.
    pub fn top_periods(&self, top_n: u32) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT name, object_count FROM periods ORDER BY object_count DESC, name LIMIT ?1",
        )?;
        let rows = stmt.query_map([top_n], |row| {
            Ok(CategoryCount {
                label: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>()
            .context("cannot query top periods")
    }

    /// Object count per classification name, largest first.
    pub fn classification_counts(&self) -> Result<Vec<CategoryCount>> {
        self.grouped(
            "SELECT name, object_count FROM classifications ORDER BY object_count DESC, name",
        )
    }

    /// Total object count over a named set of classifications.
    pub fn classification_object_total(&self, names: &[&str]) -> Result<i64> {
        if names.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "SELECT COALESCE(SUM(object_count), 0) FROM classifications WHERE name IN ({placeholders})"
        );
        self.conn()
            .query_row(&sql, params_from_iter(names.iter()), |row| row.get(0))
            .context("cannot sum classification counts")
    }

    /// Artwork count per department, joined on display name (the detail
    /// responses carry the name, not the ID).
    pub fn department_artwork_counts(&self) -> Result<Vec<DepartmentCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT d.id, d.display_name, COUNT(a.id) AS n
             FROM departments d
             JOIN artworks a ON d.display_name = a.department
             GROUP BY d.id, d.display_name
             ORDER BY n DESC, d.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DepartmentCount {
                id: row.get::<_, i64>(0)? as u64,
                display_name: row.get(1)?,
                artworks: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>()
            .context("cannot query department counts")
    }

    /// Number of distinct mediums per department.
    pub fn mediums_per_department(&self) -> Result<Vec<CategoryCount>> {
        self.grouped(
            "SELECT department, COUNT(DISTINCT medium) AS n
             FROM artworks
             WHERE department != ''
             GROUP BY department
             ORDER BY n DESC, department",
        )
    }

    fn grouped(&self, sql: &str) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryCount {
                label: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>()
            .context("cannot run grouped count")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museline_harvard::{CategoryRecord, Resource};
    use museline_met::{Artwork, Department};

    fn artwork(id: u64, medium: &str, department: &str) -> Artwork {
        Artwork {
            id,
            title: String::new(),
            artist: String::new(),
            medium: medium.to_string(),
            department: department.to_string(),
            source_page: 1,
        }
    }

    fn seed_artworks(store: &Store) {
        for (id, medium, dept) in [
            (1, "Oil on canvas", "European Paintings"),
            (2, "Oil on canvas", "European Paintings"),
            (3, "Bronze", "European Paintings"),
            (4, "Bronze", "Asian Art"),
            (5, "Silk", "Asian Art"),
            (6, "Silk", "Asian Art"),
            (7, "Woodblock print", "Asian Art"),
        ] {
            store.insert_artwork(&artwork(id, medium, dept)).unwrap();
        }
    }

    #[test]
    fn medium_counts_grouped_and_ordered() {
        let store = Store::open_in_memory().unwrap();
        seed_artworks(&store);
        let counts = store.medium_counts().unwrap();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0].count, 2); // three mediums tie at 2
        assert_eq!(counts[3], CategoryCount::new("Woodblock print", 1));
    }

    #[test]
    fn top_periods_limited() {
        let store = Store::open_in_memory().unwrap();
        for (id, name, count) in [(1, "Edo", 50), (2, "Meiji", 80), (3, "Heian", 10)] {
            store
                .insert_category(
                    Resource::Period,
                    &CategoryRecord {
                        id,
                        object_count: count,
                        name: name.to_string(),
                        source_page: 1,
                    },
                )
                .unwrap();
        }
        let top = store.top_periods(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], CategoryCount::new("Meiji", 80));
        assert_eq!(top[1], CategoryCount::new("Edo", 50));
    }

    #[test]
    fn classification_total_over_name_set() {
        let store = Store::open_in_memory().unwrap();
        for (id, name, count) in [(1, "Paintings", 100), (2, "Casts", 20), (3, "Prints", 30)] {
            store
                .insert_category(
                    Resource::Classification,
                    &CategoryRecord {
                        id,
                        object_count: count,
                        name: name.to_string(),
                        source_page: 1,
                    },
                )
                .unwrap();
        }
        assert_eq!(
            store
                .classification_object_total(&["Paintings", "Prints"])
                .unwrap(),
            130
        );
        assert_eq!(store.classification_object_total(&["Missing"]).unwrap(), 0);
        assert_eq!(store.classification_object_total(&[]).unwrap(), 0);
    }

    #[test]
    fn department_join_counts_artworks() {
        let mut store = Store::open_in_memory().unwrap();
        seed_artworks(&store);
        store
            .replace_departments(&[
                Department {
                    id: 11,
                    display_name: "European Paintings".to_string(),
                },
                Department {
                    id: 6,
                    display_name: "Asian Art".to_string(),
                },
                Department {
                    id: 13,
                    display_name: "Greek and Roman Art".to_string(),
                },
            ])
            .unwrap();

        let counts = store.department_artwork_counts().unwrap();
        // Inner join: the department with no artworks does not appear.
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].display_name, "Asian Art");
        assert_eq!(counts[0].artworks, 4);
        assert_eq!(counts[1].artworks, 3);
    }

    #[test]
    fn distinct_mediums_per_department() {
        let store = Store::open_in_memory().unwrap();
        seed_artworks(&store);
        let counts = store.mediums_per_department().unwrap();
        assert_eq!(counts[0], CategoryCount::new("Asian Art", 3));
        assert_eq!(counts[1], CategoryCount::new("European Paintings", 2));
    }
}

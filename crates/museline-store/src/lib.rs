//! Museline Store - SQLite persistence for museum records
//!
//! One database file holds everything: artworks, category counts,
//! departments, and the per-source resume cursors. Inserts are
//! keyed on the upstream record ID, so re-ingesting an overlapping
//! window is a no-op for rows already present.

pub mod aggregate;
pub mod schema;
pub mod store;

pub use aggregate::{CategoryCount, DepartmentCount};
pub use store::{CursorEntry, Store};

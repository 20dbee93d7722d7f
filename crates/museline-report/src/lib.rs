//! Museline Report - aggregation buckets and terminal charts

pub mod bucket;
pub mod chart;
pub mod grouping;

pub use bucket::{Bucket, OTHER_LABEL, collapse_other, top_n};
pub use chart::{bar_table, pie_table};
pub use grouping::{CLASSIFICATION_GROUPS, group_for};

//! Record type for Harvard category collections

/// One category row (a period or a classification), keyed by the API's
/// integer ID for that resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: u64,
    /// How many objects the museum files under this category
    pub object_count: i64,
    pub name: String,
    /// 1-based API page the record arrived on
    pub source_page: u64,
}

//! Record types for the Met collection

/// One artwork, keyed by the collection's object ID.
///
/// The field set is fixed here rather than inferred from whatever the
/// detail response happens to contain; absent fields come through empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub medium: String,
    pub department: String,
    /// 1-based batch the record arrived on.
    pub source_page: u64,
}

/// A curatorial department, refreshed wholesale (not paginated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: u64,
    pub display_name: String,
}

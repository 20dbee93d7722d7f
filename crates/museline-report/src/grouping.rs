//! Classification groups
//!
//! Harvard's classification list is fine-grained; the grouped report
//! rolls related classifications up into three broad families.

/// Names of the families and the classification names each one sums.
pub const CLASSIFICATION_GROUPS: &[(&str, &[&str])] = &[
    (
        "Paintings",
        &["Paintings with Text", "Paintings with Calligraphy", "Paintings"],
    ),
    ("Sculpture", &["Sculpture", "Casts", "Models", "Statues"]),
    (
        "Graphic Arts",
        &["Graphic Design", "Drawings", "Prints", "Photographs"],
    ),
];

/// The family a classification belongs to, if any.
pub fn group_for(classification: &str) -> Option<&'static str> {
    CLASSIFICATION_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&classification))
        .map(|(group, _)| *group)
}

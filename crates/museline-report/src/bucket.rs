//! Count buckets and the "Other" collapse
//!
//! A report starts from labeled counts, folds everything under the
//! rarity threshold into a single `Other` bucket, and optionally keeps
//! only the top N before rendering.

/// Label under which collapsed buckets are summed.
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub count: i64,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Folds every bucket whose count is below `threshold` into `Other`,
/// keeping the rest ordered by descending count. The `Other` bucket
/// always renders last, whatever its size. With a threshold of zero
/// (or one) nothing collapses.
pub fn collapse_other(buckets: Vec<Bucket>, threshold: i64) -> Vec<Bucket> {
    let mut kept = Vec::new();
    let mut other = 0i64;
    for bucket in buckets {
        if bucket.count < threshold {
            other += bucket.count;
        } else {
            kept.push(bucket);
        }
    }
    kept.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    if other > 0 {
        kept.push(Bucket::new(OTHER_LABEL, other));
    }
    kept
}

/// Keeps the `top_n` largest buckets, descending. Zero means no limit.
pub fn top_n(mut buckets: Vec<Bucket>, top_n: usize) -> Vec<Bucket> {
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    if top_n > 0 {
        buckets.truncate(top_n);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(pairs: &[(&str, i64)]) -> Vec<Bucket> {
        pairs.iter().map(|(l, c)| Bucket::new(*l, *c)).collect()
    }

    #[test]
    fn rare_buckets_fold_into_other() {
        let out = collapse_other(buckets(&[("a", 2), ("b", 1), ("c", 1)]), 2);
        assert_eq!(out, buckets(&[("a", 2), ("Other", 2)]));
    }

    #[test]
    fn bucket_at_threshold_is_kept() {
        let out = collapse_other(buckets(&[("a", 3), ("b", 3)]), 3);
        assert_eq!(out, buckets(&[("a", 3), ("b", 3)]));
    }

    #[test]
    fn zero_threshold_collapses_nothing() {
        let input = buckets(&[("a", 5), ("b", 1)]);
        assert_eq!(collapse_other(input.clone(), 0), input);
    }

    #[test]
    fn everything_below_threshold_leaves_only_other() {
        let out = collapse_other(buckets(&[("a", 1), ("b", 2)]), 10);
        assert_eq!(out, buckets(&[("Other", 3)]));
    }

    #[test]
    fn other_renders_last_even_when_largest() {
        let out = collapse_other(buckets(&[("a", 4), ("b", 3), ("c", 3)]), 4);
        assert_eq!(out, buckets(&[("a", 4), ("Other", 6)]));
    }

    #[test]
    fn top_n_truncates_after_sorting() {
        let out = top_n(buckets(&[("low", 1), ("high", 9), ("mid", 5)]), 2);
        assert_eq!(out, buckets(&[("high", 9), ("mid", 5)]));
    }

    #[test]
    fn top_n_zero_keeps_all() {
        let out = top_n(buckets(&[("a", 1), ("b", 2)]), 0);
        assert_eq!(out.len(), 2);
    }
}

//! Terminal charts
//!
//! Reports render as tables with a scaled bar column (bar charts) or a
//! percentage-share column (pie charts). Bars are scaled so the
//! largest bucket fills the full width.

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::bucket::Bucket;

const BAR_WIDTH: usize = 40;

/// Bar of `count` out of `max`, at most `width` cells wide. Non-zero
/// counts always show at least one cell.
fn bar(count: i64, max: i64, width: usize) -> String {
    if count <= 0 || max <= 0 {
        return String::new();
    }
    let cells = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.max(1))
}

fn base_table(label_header: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(label_header).fg(Color::Cyan),
            Cell::new("Count").fg(Color::Cyan),
            Cell::new("").fg(Color::Cyan),
        ]);
    table
}

/// Horizontal bar chart, one row per bucket.
pub fn bar_table(label_header: &str, buckets: &[Bucket]) -> Table {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let mut table = base_table(label_header);
    for bucket in buckets {
        table.add_row(vec![
            Cell::new(&bucket.label),
            Cell::new(bucket.count),
            Cell::new(bar(bucket.count, max, BAR_WIDTH)).fg(Color::Blue),
        ]);
    }
    table
}

/// Share-of-total chart, one row per bucket, with a trailing total row.
pub fn pie_table(label_header: &str, buckets: &[Bucket]) -> Table {
    let total: i64 = buckets.iter().map(|b| b.count).sum();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(label_header).fg(Color::Cyan),
            Cell::new("Count").fg(Color::Cyan),
            Cell::new("Share").fg(Color::Cyan),
            Cell::new("").fg(Color::Cyan),
        ]);
    for bucket in buckets {
        let share = if total > 0 {
            bucket.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&bucket.label),
            Cell::new(bucket.count),
            Cell::new(format!("{share:.1}%")),
            Cell::new(bar(bucket.count, total, BAR_WIDTH)).fg(Color::Magenta),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").fg(Color::DarkGrey),
        Cell::new(total).fg(Color::DarkGrey),
        Cell::new("100.0%").fg(Color::DarkGrey),
        Cell::new(""),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_against_max() {
        assert_eq!(bar(10, 10, 40).chars().count(), 40);
        assert_eq!(bar(5, 10, 40).chars().count(), 20);
        assert_eq!(bar(0, 10, 40), "");
    }

    #[test]
    fn tiny_nonzero_bar_is_visible() {
        assert_eq!(bar(1, 10_000, 40).chars().count(), 1);
    }

    #[test]
    fn pie_table_includes_shares_and_total() {
        let rendered = pie_table(
            "Medium",
            &[Bucket::new("Bronze", 3), Bucket::new("Marble", 1)],
        )
        .to_string();
        assert!(rendered.contains("75.0%"));
        assert!(rendered.contains("25.0%"));
        assert!(rendered.contains("Total"));
    }

    #[test]
    fn bar_table_lists_every_bucket() {
        let rendered = bar_table(
            "Period",
            &[Bucket::new("Edo", 50), Bucket::new("Meiji", 80)],
        )
        .to_string();
        assert!(rendered.contains("Edo"));
        assert!(rendered.contains("Meiji"));
        assert!(rendered.contains("80"));
    }
}

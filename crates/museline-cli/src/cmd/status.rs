//! Status subcommand - cursors and row counts

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use museline_core::fmt_num;
use museline_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StatusArgs {}

const TABLES: &[&str] = &["artworks", "periods", "classifications", "departments"];

pub fn run(_args: StatusArgs, config: &Config) -> Result<()> {
    if !config.store.db_path.exists() {
        eprintln!(
            "No database at {} (run `museline ingest` first).",
            config.store.db_path.display()
        );
        return Ok(());
    }
    let store = Store::open(&config.store.db_path)?;

    let cursors = store.cursors()?;
    if cursors.is_empty() {
        eprintln!("No ingestion recorded yet.");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Source").fg(Color::Cyan),
                Cell::new("Cursor").fg(Color::Cyan),
                Cell::new("Updated").fg(Color::Cyan),
            ]);
        for entry in &cursors {
            table.add_row(vec![
                Cell::new(&entry.source),
                Cell::new(fmt_num(entry.cursor as usize)),
                Cell::new(&entry.updated_at),
            ]);
        }
        eprintln!("\n{table}");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Table").fg(Color::Cyan),
            Cell::new("Rows").fg(Color::Cyan),
        ]);
    for name in TABLES {
        let rows = store.row_count(name)?;
        table.add_row(vec![
            Cell::new(*name),
            Cell::new(fmt_num(rows as usize)),
        ]);
    }
    eprintln!("\n{table}");

    Ok(())
}

//! museline - Museum collection ETL
//!
//! Ingests artworks and category counts from the Met and Harvard Art
//! Museums APIs into a local SQLite database, resumably, and renders
//! charts over what has landed.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "museline")]
#[command(about = "Museum collection ETL: resumable ingestion and reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./museline.toml or ~/.config/museline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Database path (overrides config)
    #[arg(long, global = true)]
    db: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest records from museum APIs
    Ingest(cmd::ingest::IngestArgs),
    /// Render charts over ingested records
    Report(cmd::report::ReportArgs),
    /// Show resume cursors and row counts
    Status(cmd::status::StatusArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(museline_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — progress bars show activity
    //   non-TTY: info unless --debug          — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    museline_core::init_logging(quiet, cli.debug, multi);

    // Load configuration
    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };
    if let Some(db) = cli.db {
        config.store.db_path = db;
    }

    match cli.command {
        Command::Ingest(args) => cmd::ingest::run(args, &config, &progress),
        Command::Report(args) => cmd::report::run(args, &config),
        Command::Status(args) => cmd::status::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Database",
                &config.store.db_path.display().to_string(),
            ]);
            table.add_row(vec!["Met base URL", &config.met.base_url]);
            table.add_row(vec!["Met metadata date", &config.met.metadata_date]);
            table.add_row(vec![
                "Met department",
                &config
                    .met
                    .department
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "all".to_string()),
            ]);
            table.add_row(vec!["Harvard base URL", &config.harvard.base_url]);
            table.add_row(vec![
                "Harvard API key",
                if config.harvard.api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);
            table.add_row(vec!["Batch size", &config.ingest.batch_size.to_string()]);
            table.add_row(vec!["Max batches", &config.ingest.max_batches.to_string()]);
            table.add_row(vec![
                "Other threshold",
                &config.report.other_threshold.to_string(),
            ]);
            table.add_row(vec!["Top N", &config.report.top_n.to_string()]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}

//! Ingest subcommand - pull museum records into the local database

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use museline_core::{BatchSource, IngestOptions, IngestSummary, SharedProgress, fmt_num, run_ingest};
use museline_harvard::{HarvardClient, HarvardSource, Resource};
use museline_met::{MetClient, MetSource};
use museline_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct IngestArgs {
    #[command(subcommand)]
    pub source: IngestSource,

    /// Records requested per batch
    #[arg(short, long, global = true)]
    pub batch_size: Option<u64>,

    /// Stop after this many batches (resume later from the cursor)
    #[arg(short = 'l', long, global = true)]
    pub max_batches: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum IngestSource {
    /// Ingest Met artworks (and refresh the department list)
    Met(MetArgs),
    /// Ingest Harvard periods and classifications
    Harvard(HarvardArgs),
    /// Ingest every source sequentially
    All(MetArgs),
}

#[derive(Args, Debug)]
pub struct MetArgs {
    /// Restrict to a single department ID
    #[arg(short, long)]
    pub department: Option<u32>,
}

#[derive(Args, Debug)]
pub struct HarvardArgs {
    /// Ingest only one category resource (default: both)
    #[arg(short, long, value_enum)]
    pub resource: Option<HarvardResource>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum HarvardResource {
    Period,
    Classification,
}

impl From<HarvardResource> for Resource {
    fn from(r: HarvardResource) -> Self {
        match r {
            HarvardResource::Period => Resource::Period,
            HarvardResource::Classification => Resource::Classification,
        }
    }
}

pub fn run(args: IngestArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let opts = IngestOptions {
        batch_size: args.batch_size.unwrap_or(config.ingest.batch_size),
        max_batches: args.max_batches.unwrap_or(config.ingest.max_batches),
    };

    match args.source {
        IngestSource::Met(met_args) => ingest_met(&met_args, config, &opts, progress),
        IngestSource::Harvard(harvard_args) => {
            ingest_harvard(&harvard_args, config, &opts, progress)
        }
        IngestSource::All(met_args) => {
            ingest_met(&met_args, config, &opts, progress)?;
            ingest_harvard(&HarvardArgs { resource: None }, config, &opts, progress)
        }
    }
}

fn open_store(config: &Config) -> Result<Store> {
    if let Some(parent) = config.store.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    Store::open(&config.store.db_path)
}

fn met_config(args: &MetArgs, config: &Config) -> museline_met::Config {
    museline_met::Config {
        base_url: config.met.base_url.clone(),
        metadata_date: config.met.metadata_date.clone(),
        department: args.department.or(config.met.department),
    }
}

fn ingest_met(
    args: &MetArgs,
    config: &Config,
    opts: &IngestOptions,
    progress: &SharedProgress,
) -> Result<()> {
    let met_config = met_config(args, config);
    let mut store = open_store(config)?;

    // The department list is small and unversioned upstream, so every
    // run replaces it wholesale. A failure here only degrades the
    // department reports, never the ingestion itself.
    let client = MetClient::new(met_config.clone());
    match client.departments() {
        Ok(departments) => {
            log::info!("Refreshed {} departments", departments.len());
            store.replace_departments(&departments)?;
        }
        Err(e) => log::warn!("Department refresh failed: {e}"),
    }

    let mut source = MetSource::new(client, met_config.department);
    let pb = progress.ingest_bar(source.name());
    let summary = run_ingest(&mut source, &store, |a| store.insert_artwork(a), opts, &pb)?;
    pb.finish_and_clear();

    print_summary(&summary);
    Ok(())
}

fn ingest_harvard(
    args: &HarvardArgs,
    config: &Config,
    opts: &IngestOptions,
    progress: &SharedProgress,
) -> Result<()> {
    let api_key = config
        .harvard
        .api_key
        .clone()
        .context("Harvard API key not configured (set HARVARD_API_KEY or [harvard] api_key)")?;
    let harvard_config = museline_harvard::Config {
        base_url: config.harvard.base_url.clone(),
        api_key,
    };
    let store = open_store(config)?;

    let resources = match args.resource {
        Some(r) => vec![Resource::from(r)],
        None => vec![Resource::Period, Resource::Classification],
    };
    for resource in resources {
        let client = HarvardClient::new(harvard_config.clone());
        let mut source = HarvardSource::new(client, resource);
        let pb = progress.ingest_bar(source.name());
        let summary = run_ingest(
            &mut source,
            &store,
            |r| store.insert_category(resource, r),
            opts,
            &pb,
        )?;
        pb.finish_and_clear();
        print_summary(&summary);
    }

    Ok(())
}

/// Per-source summary table on stderr
fn print_summary(summary: &IngestSummary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(&summary.source).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new("Cursor"),
        Cell::new(format!(
            "{} → {}",
            fmt_num(summary.start_cursor as usize),
            fmt_num(summary.end_cursor as usize)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Batches"),
        Cell::new(fmt_num(summary.batches as usize)),
    ]);
    table.add_row(vec![
        Cell::new("Listed"),
        Cell::new(fmt_num(summary.listed)),
    ]);
    table.add_row(vec![
        Cell::new("Inserted"),
        Cell::new(fmt_num(summary.inserted)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Already present"),
        Cell::new(fmt_num(summary.already_present)),
    ]);
    let failures_cell = if summary.detail_failures > 0 {
        Cell::new(fmt_num(summary.detail_failures)).fg(Color::Red)
    } else {
        Cell::new("0").fg(Color::DarkGrey)
    };
    table.add_row(vec![Cell::new("Detail failures"), failures_cell]);
    table.add_row(vec![
        Cell::new("Exhausted"),
        if summary.exhausted {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no (resume to continue)").fg(Color::Yellow)
        },
    ]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format!("{:.1}s", summary.elapsed.as_secs_f64())),
    ]);

    eprintln!("\n{table}");
}

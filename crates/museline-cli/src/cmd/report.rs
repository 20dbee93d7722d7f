//! Report subcommand - charts over the ingested records

use anyhow::Result;
use clap::{Args, Subcommand};

use museline_report::{Bucket, CLASSIFICATION_GROUPS, bar_table, collapse_other, pie_table};
use museline_store::{CategoryCount, Store};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub chart: ReportChart,

    /// Counts below this fold into "Other" (pie charts)
    #[arg(short = 't', long = "threshold", global = true)]
    pub threshold: Option<i64>,

    /// Row limit for ranked charts
    #[arg(short = 'n', long = "top", global = true)]
    pub top: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum ReportChart {
    /// Share of artworks per medium (pie)
    Mediums,
    /// Periods with the most objects (bar)
    Periods,
    /// Object counts per classification (bar)
    Classifications {
        /// Roll classifications up into broad families (pie)
        #[arg(long)]
        grouped: bool,
    },
    /// Artworks per curatorial department (bar)
    Departments,
    /// Distinct mediums per department (bar)
    DeptMediums,
}

pub fn run(args: ReportArgs, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let threshold = args.threshold.unwrap_or(config.report.other_threshold);
    let top_n = args.top.unwrap_or(config.report.top_n);

    match args.chart {
        ReportChart::Mediums => {
            let buckets = collapse_other(buckets(store.medium_counts()?), threshold);
            require_rows(&buckets, "artworks")?;
            eprintln!("\n{}", pie_table("Medium", &buckets));
        }
        ReportChart::Periods => {
            let buckets = buckets(store.top_periods(top_n)?);
            require_rows(&buckets, "periods")?;
            eprintln!("\n{}", bar_table("Period", &buckets));
        }
        ReportChart::Classifications { grouped: false } => {
            let buckets = collapse_other(buckets(store.classification_counts()?), threshold);
            require_rows(&buckets, "classifications")?;
            eprintln!("\n{}", bar_table("Classification", &buckets));
        }
        ReportChart::Classifications { grouped: true } => {
            let mut groups = Vec::new();
            for (family, members) in CLASSIFICATION_GROUPS {
                groups.push(Bucket::new(*family, store.classification_object_total(members)?));
            }
            require_rows(&groups, "classifications")?;
            eprintln!("\n{}", pie_table("Classification group", &groups));
        }
        ReportChart::Departments => {
            let buckets: Vec<Bucket> = store
                .department_artwork_counts()?
                .into_iter()
                .map(|d| Bucket::new(d.display_name, d.artworks))
                .collect();
            require_rows(&buckets, "departments")?;
            eprintln!("\n{}", bar_table("Department", &buckets));
        }
        ReportChart::DeptMediums => {
            let buckets = buckets(store.mediums_per_department()?);
            require_rows(&buckets, "artworks")?;
            eprintln!("\n{}", bar_table("Department (distinct mediums)", &buckets));
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<Store> {
    anyhow::ensure!(
        config.store.db_path.exists(),
        "no database at {} (run `museline ingest` first)",
        config.store.db_path.display()
    );
    Store::open(&config.store.db_path)
}

fn buckets(counts: Vec<CategoryCount>) -> Vec<Bucket> {
    counts
        .into_iter()
        .map(|c| Bucket::new(c.label, c.count))
        .collect()
}

fn require_rows(buckets: &[Bucket], table: &str) -> Result<()> {
    if buckets.is_empty() || buckets.iter().all(|b| b.count == 0) {
        anyhow::bail!("no {table} ingested yet");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buckets_are_rejected() {
        assert!(require_rows(&[], "artworks").is_err());
        assert!(require_rows(&[Bucket::new("x", 0)], "artworks").is_err());
        assert!(require_rows(&[Bucket::new("x", 1)], "artworks").is_ok());
    }
}

//! Museline Core - Common infrastructure for museum data pipelines
//!
//! This crate provides the shared pieces of the ingestion pipelines:
//! a blocking HTTP facade, the resumable batch-ingestion procedure,
//! logging, and progress reporting.

pub mod error;
pub mod http;
pub mod ingest;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use error::FetchError;
pub use http::{SHARED_RUNTIME, get_json, http_client};
pub use ingest::{Batch, BatchSource, CursorStore, IngestOptions, IngestSummary, run_ingest};
pub use logging::init_logging;
pub use progress::{ProgressContext, SharedProgress, fmt_num};

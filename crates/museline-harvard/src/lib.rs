//! Harvard Art Museums API source
//!
//! Ingests the `period` and `classification` category collections via
//! page-number pagination, each as its own resumable
//! [`museline_core::BatchSource`] with an independent cursor.

pub mod client;
pub mod config;
pub mod record;
pub mod resource;
pub mod source;

pub use client::HarvardClient;
pub use config::Config;
pub use record::CategoryRecord;
pub use resource::Resource;
pub use source::HarvardSource;

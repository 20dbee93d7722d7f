//! Met collection API source
//!
//! Lists object IDs for a (optionally department-scoped) snapshot of the
//! collection, fetches each object's detail, and exposes the whole thing
//! as a resumable [`museline_core::BatchSource`].

pub mod client;
pub mod config;
pub mod record;
pub mod source;

pub use client::MetClient;
pub use config::Config;
pub use record::{Artwork, Department};
pub use source::MetSource;

//! Batch source over the Met's flat object-ID listing

use museline_core::{Batch, BatchSource, FetchError};

use crate::client::MetClient;
use crate::record::Artwork;

/// Paginates the Met collection as index ranges over the object-ID list.
///
/// The listing is fetched once per run, on the first batch; a listing
/// failure therefore aborts the run before the cursor moves. Each ID in
/// a window is fetched individually, and a failed detail fetch skips
/// that object only.
pub struct MetSource {
    client: MetClient,
    name: String,
    object_ids: Option<Vec<u64>>,
}

impl MetSource {
    pub fn new(client: MetClient, department: Option<u32>) -> Self {
        // The ID list ordering differs per department, so each
        // department gets its own resume cursor.
        let name = match department {
            Some(dept) => format!("met.dept{dept}"),
            None => "met".to_string(),
        };
        Self {
            client,
            name,
            object_ids: None,
        }
    }

    fn object_ids(&mut self) -> Result<&[u64], FetchError> {
        if self.object_ids.is_none() {
            let ids = self.client.list_object_ids()?;
            log::info!("{}: listing has {} objects", self.name, ids.len());
            self.object_ids = Some(ids);
        }
        Ok(self.object_ids.as_deref().unwrap_or_default())
    }
}

impl BatchSource for MetSource {
    type Record = Artwork;

    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_batch(&mut self, offset: u64, batch_size: u64) -> Result<Batch<Artwork>, FetchError> {
        let name = self.name.clone();
        let ids = self.object_ids()?;

        let start = (offset as usize).min(ids.len());
        let end = ((offset + batch_size) as usize).min(ids.len());
        let window: Vec<u64> = ids[start..end].to_vec();
        let listed = window.len();
        let page = offset / batch_size + 1;

        let mut records = Vec::with_capacity(listed);
        let mut detail_failures = 0;
        for id in window {
            match self.client.object_detail(id) {
                Ok(mut artwork) => {
                    artwork.source_page = page;
                    records.push(artwork);
                }
                Err(e) => {
                    log::warn!("{name}: object {id} skipped: {e}");
                    detail_failures += 1;
                }
            }
        }

        Ok(Batch {
            records,
            listed,
            detail_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn source_name_without_department() {
        let source = MetSource::new(MetClient::new(Config::default()), None);
        assert_eq!(source.name(), "met");
    }

    #[test]
    fn source_name_per_department() {
        let source = MetSource::new(MetClient::new(Config::default()), Some(11));
        assert_eq!(source.name(), "met.dept11");
    }

    #[test]
    fn window_past_end_is_empty() {
        let mut source = MetSource::new(MetClient::new(Config::default()), None);
        // Pre-seed the listing so no network call happens.
        source.object_ids = Some(vec![1, 2, 3]);
        let batch = source.fetch_batch(10, 5).unwrap();
        assert_eq!(batch.listed, 0);
        assert!(batch.records.is_empty());
    }
}

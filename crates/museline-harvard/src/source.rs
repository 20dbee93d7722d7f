//! Batch source over Harvard's page-number pagination

use museline_core::{Batch, BatchSource, FetchError};

use crate::client::{HarvardClient, parse_record};
use crate::record::CategoryRecord;
use crate::resource::Resource;

/// Map a record offset to the API's 1-based page number. Cursors only
/// advance in whole batches, so the division is exact.
fn page_for(offset: u64, batch_size: u64) -> u64 {
    offset / batch_size + 1
}

/// Paginates one Harvard category resource by page number, driven by
/// the shared record-offset cursor.
pub struct HarvardSource {
    client: HarvardClient,
    resource: Resource,
    name: String,
}

impl HarvardSource {
    pub fn new(client: HarvardClient, resource: Resource) -> Self {
        let name = format!("harvard.{}", resource.api_name());
        Self {
            client,
            resource,
            name,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }
}

impl BatchSource for HarvardSource {
    type Record = CategoryRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_batch(
        &mut self,
        offset: u64,
        batch_size: u64,
    ) -> Result<Batch<CategoryRecord>, FetchError> {
        let page = page_for(offset, batch_size);
        let raw_records = self.client.fetch_page(self.resource, page, batch_size)?;
        let listed = raw_records.len();

        let mut records = Vec::with_capacity(listed);
        let mut detail_failures = 0;
        for raw in &raw_records {
            match parse_record(self.resource, raw, page) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("{}: record skipped on page {page}: {e}", self.name);
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

//! Harvard Art Museums API client

use museline_core::{FetchError, get_json};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::record::CategoryRecord;
use crate::resource::Resource;

/// One listing page. A response without a `records` array means the
/// resource is exhausted, so the default keeps that case an empty page.
#[derive(Debug, Deserialize)]
struct PageWire {
    #[serde(default)]
    records: Vec<Value>,
}

pub struct HarvardClient {
    config: Config,
}

impl HarvardClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch one page of a category resource, sorted by ID so page
    /// windows are stable across runs. Records come back raw; parsing
    /// failures must stay per-record.
    pub fn fetch_page(
        &self,
        resource: Resource,
        page: u64,
        size: u64,
    ) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/{}", self.config.base_url, resource.api_name());
        let query = [
            ("size", size.to_string()),
            ("page", page.to_string()),
            ("sort", resource.id_field().to_string()),
            ("apikey", self.config.api_key.clone()),
        ];
        let query: Vec<(&str, String)> = query.into_iter().collect();
        let wire: PageWire = get_json(&url, &query)?;
        Ok(wire.records)
    }
}

/// Parse one raw record. The key must be present; the descriptive
/// fields are tolerated as absent.
pub fn parse_record(
    resource: Resource,
    raw: &Value,
    page: u64,
) -> Result<CategoryRecord, FetchError> {
    let id = raw
        .get(resource.id_field())
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            FetchError::malformed(format!("record missing '{}'", resource.id_field()))
        })?;
    let object_count = raw.get("objectcount").and_then(Value::as_i64).unwrap_or(0);
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(CategoryRecord {
        id,
        object_count,
        name,
        source_page: page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_parses_records() {
        let body = r#"{"info": {"page": 1}, "records": [
            {"periodid": 1, "objectcount": 5, "name": "Edo"},
            {"periodid": 2, "objectcount": 9, "name": "Meiji"}
        ]}"#;
        let wire: PageWire = serde_json::from_str(body).unwrap();
        assert_eq!(wire.records.len(), 2);
    }

    #[test]
    fn page_without_records_is_empty() {
        let body = r#"{"info": {"page": 99}}"#;
        let wire: PageWire = serde_json::from_str(body).unwrap();
        assert!(wire.records.is_empty());
    }

    #[test]
    fn parse_period_record() {
        let raw = json!({"periodid": 7, "objectcount": 120, "name": "Bronze Age"});
        let rec = parse_record(Resource::Period, &raw, 3).unwrap();
        assert_eq!(rec.id, 7);
        assert_eq!(rec.object_count, 120);
        assert_eq!(rec.name, "Bronze Age");
        assert_eq!(rec.source_page, 3);
    }

    #[test]
    fn parse_classification_record() {
        let raw = json!({"classificationid": 21, "objectcount": 4, "name": "Casts"});
        let rec = parse_record(Resource::Classification, &raw, 1).unwrap();
        assert_eq!(rec.id, 21);
        assert_eq!(rec.name, "Casts");
    }

    #[test]
    fn parse_tolerates_missing_descriptive_fields() {
        let raw = json!({"periodid": 9});
        let rec = parse_record(Resource::Period, &raw, 1).unwrap();
        assert_eq!(rec.object_count, 0);
        assert_eq!(rec.name, "");
    }

    #[test]
    fn parse_fails_without_key() {
        let raw = json!({"objectcount": 4, "name": "Nameless"});
        assert!(parse_record(Resource::Period, &raw, 1).is_err());
    }

    #[test]
    fn parse_fails_on_wrong_resource_key() {
        // A classification record fed to the period parser has no
        // periodid and must fail that record only.
        let raw = json!({"classificationid": 21, "name": "Casts"});
        assert!(parse_record(Resource::Period, &raw, 1).is_err());
    }
}

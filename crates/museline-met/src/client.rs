//! Met collection API client

use museline_core::{FetchError, get_json};
use serde::Deserialize;

use crate::config::Config;
use crate::record::{Artwork, Department};

/// Listing response: the flat object-ID list the index range paginates
/// over.
#[derive(Debug, Deserialize)]
struct ObjectListWire {
    #[serde(rename = "objectIDs", default)]
    object_ids: Option<Vec<u64>>,
}

/// Detail response, explicit field list; everything but the key is
/// optional (absence is tolerated, treated as empty).
#[derive(Debug, Deserialize)]
struct ObjectWire {
    #[serde(rename = "objectID")]
    object_id: u64,
    title: Option<String>,
    #[serde(rename = "artistDisplayName")]
    artist_display_name: Option<String>,
    medium: Option<String>,
    department: Option<String>,
}

impl From<ObjectWire> for Artwork {
    fn from(w: ObjectWire) -> Self {
        Artwork {
            id: w.object_id,
            title: w.title.unwrap_or_default(),
            artist: w.artist_display_name.unwrap_or_default(),
            medium: w.medium.unwrap_or_default(),
            department: w.department.unwrap_or_default(),
            source_page: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DepartmentListWire {
    departments: Vec<DepartmentWire>,
}

#[derive(Debug, Deserialize)]
struct DepartmentWire {
    #[serde(rename = "departmentId")]
    department_id: u64,
    #[serde(rename = "displayName")]
    display_name: String,
}

pub struct MetClient {
    config: Config,
}

impl MetClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch the full object-ID list, optionally scoped to one
    /// department. A null `objectIDs` field means an empty collection.
    pub fn list_object_ids(&self) -> Result<Vec<u64>, FetchError> {
        let url = format!("{}/objects", self.config.base_url);
        let mut query = vec![("metadataDate", self.config.metadata_date.clone())];
        if let Some(dept) = self.config.department {
            query.push(("departmentIds", dept.to_string()));
        }
        let wire: ObjectListWire = get_json(&url, &query)?;
        Ok(wire.object_ids.unwrap_or_default())
    }

    /// Fetch one artwork's detail. `source_page` is left at 0 for the
    /// caller to fill in.
    pub fn object_detail(&self, id: u64) -> Result<Artwork, FetchError> {
        let url = format!("{}/objects/{id}", self.config.base_url);
        let wire: ObjectWire = get_json(&url, &[])?;
        Ok(wire.into())
    }

    /// Fetch all curatorial departments.
    pub fn departments(&self) -> Result<Vec<Department>, FetchError> {
        let url = format!("{}/departments", self.config.base_url);
        let wire: DepartmentListWire = get_json(&url, &[])?;
        Ok(wire
            .departments
            .into_iter()
            .map(|d| Department {
                id: d.department_id,
                display_name: d.display_name,
            })
            .collect())
    }
}

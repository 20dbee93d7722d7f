//! Paginated resource types in the Harvard Art Museums API

/// Category collections this pipeline ingests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Period,
    Classification,
}

impl Resource {
    /// Parse CLI/config string into enum
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "period" => Some(Self::Period),
            "classification" => Some(Self::Classification),
            _ => None,
        }
    }

    /// API path segment
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Period => "period",
            Self::Classification => "classification",
        }
    }

    /// Record key field in the API response
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Period => "periodid",
            Self::Classification => "classificationid",
        }
    }

    /// Table the records land in
    pub fn table(self) -> &'static str {
        match self {
            Self::Period => "periods",
            Self::Classification => "classifications",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

//! Met pipeline configuration

/// Runtime configuration for the Met source
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the collection API
    pub base_url: String,
    /// Metadata snapshot date the listing endpoint requires
    pub metadata_date: String,
    /// Restrict the listing to one curatorial department
    pub department: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://collectionapi.metmuseum.org/public/collection/v1".to_string(),
            metadata_date: "2018-10-22".to_string(),
            department: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.base_url.starts_with("https://"));
        assert!(!config.base_url.ends_with('/'));
        assert!(config.department.is_none());
    }
}

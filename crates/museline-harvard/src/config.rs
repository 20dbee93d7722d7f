//! Harvard pipeline configuration

/// Runtime configuration for the Harvard source
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Required by the API as an `apikey` query parameter
    pub api_key: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.harvardartmuseums.org".to_string(),
            api_key: api_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_public_endpoint() {
        let config = Config::new("key");
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.api_key, "key");
    }
}

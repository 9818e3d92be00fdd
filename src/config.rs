use serde::{Deserialize, Serialize};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Treat `? _ * %` as wildcards.
    pub enable_wildcard: bool,
    pub cache_capacity: usize,
    /// When false every clause is compiled as if prefixed with `$`.
    pub lenient: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_wildcard: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            lenient: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchConfig, DEFAULT_CACHE_CAPACITY};

    #[test]
    fn missing_fields_take_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"lenient":false}"#).unwrap();
        assert!(!config.lenient);
        assert!(config.enable_wildcard);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SearchConfig::default()).unwrap();
        assert_eq!(json["enableWildcard"], true);
        assert_eq!(json["cacheCapacity"], 256);
    }
}

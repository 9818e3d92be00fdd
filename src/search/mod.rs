//! The search feature: owns its configuration and parse cache for as long as
//! the feature instance lives.

use crate::{
    cache::QueryCache,
    config::SearchConfig,
    query::QueryComponent,
    sql::{self, CompiledQuery},
};
use tracing::debug;

pub struct TagSearch {
    config: SearchConfig,
    cache: QueryCache,
}

impl Default for TagSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl TagSearch {
    pub fn new(config: SearchConfig) -> Self {
        debug!(
            cache_capacity = config.cache_capacity,
            enable_wildcard = config.enable_wildcard,
            lenient = config.lenient,
            "search feature created"
        );
        Self {
            cache: QueryCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn parse(&self, raw: &str) -> Vec<QueryComponent> {
        self.cache.get_or_parse(raw, self.config.enable_wildcard)
    }

    pub fn compile_query(&self, raw: &str) -> CompiledQuery {
        let mut components = self.parse(raw);
        if !self.config.lenient {
            for component in &mut components {
                component.set_exact(true);
            }
        }
        sql::compile(&components)
    }
}

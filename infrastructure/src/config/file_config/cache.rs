//! Cache configuration from TOML (`[cache]` section)

use droidmind_application::CacheConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ```toml
/// [cache]
/// max_entries = 10000
/// max_age_secs = 3600   # optional wall-clock limit on top of turn-based expiry
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub max_entries: usize,
    pub max_age_secs: Option<u64>,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        let defaults = CacheConfig::default();
        Self {
            max_entries: defaults.max_entries,
            max_age_secs: defaults.max_age.map(|d| d.as_secs()),
        }
    }
}

impl FileCacheConfig {
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_entries: self.max_entries.max(1),
            max_age: self.max_age_secs.map(Duration::from_secs),
        }
    }
}

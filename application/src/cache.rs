//! Shared tool-result cache.
//!
//! Results are cached only when the backend annotates them with a positive
//! duration, counted in turns:
//!
//! - `put` stores the entry with `remaining_duration = original_duration = n`.
//! - `lookup` on a live entry refreshes `remaining_duration` back to `n`.
//! - `sweep` (once per turn) decrements every entry and drops those that
//!   reach zero, plus anything older than `max_age` when configured.
//!
//! So an entry survives `n` turns without being used. The cache is shared by
//! every session; `DashMap` gives atomic insert-or-overwrite per key.
//!
//! Because the cache is shared, `sweep` runs at the end of every session's
//! turn, and "n turns" counts turns across all sessions. Which results a
//! session replays is tracked separately by that session
//! (`Session::track_cached_tools`), counting only its own turns.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use droidmind_domain::tool::canonical::cache_key;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// A cached tool result.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub tool_name: String,
    pub arguments: Map<String, Value>,
    pub result: Value,
    pub remaining_duration: u32,
    pub original_duration: u32,
    pub cached_at: DateTime<Utc>,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum entries; the oldest entry is evicted on overflow.
    pub max_entries: usize,
    /// Wall-clock ceiling on entry age, independent of the turn counter.
    pub max_age: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_age: None,
        }
    }
}

/// Tool-result cache keyed by `(tool name, canonical arguments)`.
pub struct ToolResultCache {
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
}

impl Default for ToolResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ToolResultCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    /// Live entry for the call, refreshing its remaining duration.
    pub fn lookup(&self, tool_name: &str, arguments: &Map<String, Value>) -> Option<CacheEntry> {
        let key = cache_key(tool_name, arguments);
        let mut entry = self.entries.get_mut(&key)?;
        if entry.remaining_duration == 0 || self.is_too_old(&entry, Utc::now()) {
            return None;
        }
        entry.remaining_duration = entry.original_duration;
        Some(entry.value().clone())
    }

    /// Live entry for the call, without refreshing it.
    pub fn peek(&self, tool_name: &str, arguments: &Map<String, Value>) -> Option<CacheEntry> {
        let entry = self.entries.get(&cache_key(tool_name, arguments))?;
        if entry.remaining_duration == 0 || self.is_too_old(&entry, Utc::now()) {
            return None;
        }
        Some(entry.value().clone())
    }

    /// Store a result for `duration` turns. Returns `false` (and stores
    /// nothing) when the duration is zero.
    pub fn put(
        &self,
        tool_name: &str,
        arguments: &Map<String, Value>,
        result: Value,
        duration: u32,
    ) -> bool {
        if duration == 0 {
            return false;
        }
        let key = cache_key(tool_name, arguments);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                key,
                tool_name: tool_name.to_string(),
                arguments: arguments.clone(),
                result,
                remaining_duration: duration,
                original_duration: duration,
                cached_at: Utc::now(),
            },
        );
        true
    }

    /// Age every entry by one turn and drop the expired ones. Returns the
    /// number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            entry.remaining_duration = entry.remaining_duration.saturating_sub(1);
            entry.remaining_duration > 0 && !self.is_too_old(entry, now)
        });
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Swept tool result cache");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn is_too_old(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        match self.config.max_age.and_then(|age| TimeDelta::from_std(age).ok()) {
            Some(max_age) => now - entry.cached_at > max_age,
            None => false,
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.cached_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

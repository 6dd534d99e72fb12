//! Time-based profile cache.
//!
//! Entries are fresh for a fixed TTL after they were fetched. A repeated
//! fetch for the same username overwrites the entry (last writer wins).
//! When `max_entries` is set, inserting a new username into a full cache
//! evicts the entry with the oldest fetch time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::types::Profile;
use super::{FetchError, ProfileFetcher};
use crate::metrics;

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds an entry stays fresh (default: 600).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Maximum number of entries, 0 for unbounded (default: 0).
    #[serde(default)]
    pub max_entries: usize,
}

fn default_ttl() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    profile: Profile,
}

/// Username-keyed profile cache shared across fetch workers and runs.
#[derive(Debug)]
pub struct ProfileCache {
    ttl: Duration,
    max_entries: Option<usize>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl ProfileCache {
    /// Create an unbounded cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            max_entries: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        let cache = Self::new(Duration::from_secs(config.ttl_secs));
        match config.max_entries {
            0 => cache,
            n => cache.with_capacity_limit(n),
        }
    }

    /// Bound the number of entries.
    pub fn with_capacity_limit(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Entry TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached profile if it is still fresh.
    pub async fn get(&self, username: &str) -> Option<Profile> {
        let entries = self.entries.read().await;
        match entries.get(username) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                metrics::PROFILE_CACHE_LOOKUPS
                    .with_label_values(&["hit"])
                    .inc();
                debug!(username = %username, "Profile cache hit");
                Some(entry.profile.clone())
            }
            Some(_) => {
                metrics::PROFILE_CACHE_LOOKUPS
                    .with_label_values(&["expired"])
                    .inc();
                debug!(username = %username, "Profile cache entry expired");
                None
            }
            None => {
                metrics::PROFILE_CACHE_LOOKUPS
                    .with_label_values(&["miss"])
                    .inc();
                None
            }
        }
    }

    /// Store a freshly fetched profile, keyed by its username.
    pub async fn insert(&self, profile: Profile) {
        self.insert_at(profile, Instant::now()).await;
    }

    /// Store a profile whose fetch started at `fetched_at`. The TTL runs from
    /// that instant.
    pub async fn insert_at(&self, profile: Profile, fetched_at: Instant) {
        let mut entries = self.entries.write().await;

        if let Some(max) = self.max_entries {
            if entries.len() >= max && !entries.contains_key(&profile.username) {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.fetched_at)
                    .map(|(k, _)| k.clone());
                if let Some(key) = oldest {
                    debug!(username = %key, "Evicting oldest profile cache entry");
                    entries.remove(&key);
                }
            }
        }

        entries.insert(
            profile.username.clone(),
            CacheEntry {
                fetched_at,
                profile,
            },
        );
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// A [`ProfileFetcher`] that consults a [`ProfileCache`] before delegating.
pub struct CachedFetcher<F: ProfileFetcher> {
    inner: F,
    cache: Arc<ProfileCache>,
}

impl<F: ProfileFetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: Arc<ProfileCache>) -> Self {
        Self { inner, cache }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<ProfileCache> {
        &self.cache
    }
}

#[async_trait]
impl<F: ProfileFetcher> ProfileFetcher for CachedFetcher<F> {
    async fn fetch(&self, username: &str) -> Result<Profile, FetchError> {
        if let Some(profile) = self.cache.get(username).await {
            return Ok(profile);
        }

        let started = Instant::now();
        let profile = self.inner.fetch(username).await?;
        self.cache.insert_at(profile.clone(), started).await;
        Ok(profile)
    }
}

//! Mock profile fetcher for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::profile::{FetchError, Profile, ProfileFetcher};

/// Mock implementation of the ProfileFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return configured profiles, `NotFound` for anything else
/// - Fail specific usernames
/// - Simulate latency
/// - Track calls and the peak number of concurrent fetches
#[derive(Debug, Default)]
pub struct MockProfileFetcher {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    latency: Arc<RwLock<Option<Duration>>>,
    calls: Arc<RwLock<Vec<String>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockProfileFetcher {
    /// Create a new mock with no profiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, keyed by its username.
    pub async fn add_profile(&self, profile: Profile) {
        self.profiles
            .write()
            .await
            .insert(profile.username.clone(), profile);
    }

    /// Replace all profiles.
    pub async fn set_profiles(&self, profiles: Vec<Profile>) {
        let mut map = self.profiles.write().await;
        map.clear();
        for profile in profiles {
            map.insert(profile.username.clone(), profile);
        }
    }

    /// Make every fetch for `username` fail with an upstream error.
    pub async fn fail_for(&self, username: &str) {
        self.failing.write().await.insert(username.to_string());
    }

    /// Delay every fetch by `latency`.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// All usernames fetched, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Number of fetches for one username.
    pub async fn fetch_count(&self, username: &str) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|u| u.as_str() == username)
            .count()
    }

    /// Peak number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileFetcher for MockProfileFetcher {
    async fn fetch(&self, username: &str) -> Result<Profile, FetchError> {
        self.calls.write().await.push(username.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let result = if self.failing.read().await.contains(username) {
            Err(FetchError::ApiError {
                username: username.to_string(),
                status: 500,
                message: "mock failure".to_string(),
            })
        } else {
            self.profiles
                .read()
                .await
                .get(username)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(username.to_string()))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

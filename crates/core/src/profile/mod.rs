//! Candidate profile retrieval.
//!
//! A [`ProfileFetcher`] turns a username into a [`Profile`]. The default
//! implementation is [`BiosClient`], which calls a genome bios endpoint over
//! HTTP; [`CachedFetcher`] wraps any fetcher with a [`ProfileCache`].

mod bios;
mod cache;
mod types;

pub use bios::{BiosClient, BiosConfig};
pub use cache::{CacheConfig, CachedFetcher, ProfileCache};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching one profile.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("Profile fetch failed for {username}: {source}")]
    HttpError {
        username: String,
        #[source]
        source: reqwest::Error,
    },

    /// Profile not found (404).
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Upstream returned a non-success status.
    #[error("Profile fetch failed for {username}: {status} - {message}")]
    ApiError {
        username: String,
        status: u16,
        message: String,
    },

    /// Failed to decode the response body.
    #[error("Failed to parse profile for {username}: {message}")]
    ParseError { username: String, message: String },
}

impl FetchError {
    /// The username the failed fetch was for.
    pub fn username(&self) -> &str {
        match self {
            FetchError::HttpError { username, .. } => username,
            FetchError::NotFound(username) => username,
            FetchError::ApiError { username, .. } => username,
            FetchError::ParseError { username, .. } => username,
        }
    }
}

/// Capability to fetch a profile by username.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch the profile for `username`.
    async fn fetch(&self, username: &str) -> Result<Profile, FetchError>;
}

#[async_trait]
impl<T: ProfileFetcher + ?Sized> ProfileFetcher for std::sync::Arc<T> {
    async fn fetch(&self, username: &str) -> Result<Profile, FetchError> {
        (**self).fetch(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_username() {
        let err = FetchError::ApiError {
            username: "jdoe".to_string(),
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.username(), "jdoe");
        assert_eq!(
            err.to_string(),
            "Profile fetch failed for jdoe: 503 - unavailable"
        );

        let err = FetchError::NotFound("nobody".to_string());
        assert_eq!(err.username(), "nobody");
    }
}

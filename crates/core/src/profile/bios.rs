//! Genome bios HTTP client.
//!
//! Fetches `GET {base_url}/{username}` and decodes the genome payload into a
//! [`Profile`]. No retries: a failed fetch is reported and left to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{GenomeResponse, Profile};
use super::{FetchError, ProfileFetcher};
use crate::metrics;

/// Bios client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiosConfig {
    /// Endpoint prefix; the username is appended as the last path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://torre.ai/api/genome/bios".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("crewfinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BiosConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// HTTP-backed [`ProfileFetcher`].
pub struct BiosClient {
    client: Client,
    base_url: String,
}

impl BiosClient {
    /// Create a new bios client.
    pub fn new(config: BiosConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for one username, percent-encoded.
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }

    async fn fetch_genome(&self, username: &str) -> Result<GenomeResponse, FetchError> {
        let url = self.profile_url(username);
        debug!(username = %username, url = %url, "Fetching genome");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::HttpError {
                username: username.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(username.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::ApiError {
                username: username.to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<GenomeResponse>()
            .await
            .map_err(|e| FetchError::ParseError {
                username: username.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl ProfileFetcher for BiosClient {
    async fn fetch(&self, username: &str) -> Result<Profile, FetchError> {
        let start = Instant::now();
        let result = self.fetch_genome(username).await;
        metrics::PROFILE_FETCH_DURATION
            .with_label_values(&[])
            .observe(start.elapsed().as_secs_f64());

        result.map(|genome| Profile::from_genome(username, genome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server) -> BiosClient {
        BiosClient::new(BiosConfig {
            base_url: format!("{}/bios/", server.url()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = BiosConfig::default();
        assert_eq!(config.base_url, "https://torre.ai/api/genome/bios");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("crewfinder/"));
    }

    #[test]
    fn test_profile_url_encodes_username() {
        let client = BiosClient::new(BiosConfig::default()).unwrap();
        assert_eq!(
            client.profile_url("a b/c"),
            "https://torre.ai/api/genome/bios/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/bios/torrenegra")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "person": { "name": "Alexander Torrenegra", "username": "torrenegra" },
                    "strengths": [
                        { "name": "Leadership", "proficiency": "expert", "weight": 3.2 },
                        { "name": "Entrepreneurship", "proficiency": "master" }
                    ],
                    "experiences": []
                }"#,
            )
            .create_async()
            .await;

        let profile = client_for(&server).fetch("torrenegra").await.unwrap();

        assert_eq!(profile.username, "torrenegra");
        assert_eq!(profile.display_name.as_deref(), Some("Alexander Torrenegra"));
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.skills[0].weight, Some(3.2));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_null_strengths_yields_empty_profile() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/bios/quiet")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "person": { "name": "Quiet" }, "strengths": null }"#)
            .create_async()
            .await;

        let profile = client_for(&server).fetch("quiet").await.unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Quiet"));
        assert!(profile.skills.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/bios/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server).fetch("missing").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref u) if u == "missing"));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/bios/flaky")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client_for(&server).fetch("flaky").await.unwrap_err();
        match err {
            FetchError::ApiError {
                username,
                status,
                message,
            } => {
                assert_eq!(username, "flaky");
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/bios/garbled")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).fetch("garbled").await.unwrap_err();
        assert!(matches!(err, FetchError::ParseError { .. }));
        assert_eq!(err.username(), "garbled");
    }
}

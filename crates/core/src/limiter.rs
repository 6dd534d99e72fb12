//! Bounded-parallelism profile fetching.
//!
//! A fixed number of workers pull the next pending candidate from a shared
//! queue as soon as they finish the previous one, so no worker idles while
//! work remains. Workers run as futures joined on the calling task; results
//! are applied to the candidate slice once every worker has settled.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::metrics;
use crate::profile::{Candidate, FetchError, Profile, ProfileFetcher};

/// Default number of concurrent fetches.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Outcome counts of one [`ConcurrencyLimiter::run_all`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Profiles fetched and attached.
    pub fetched: usize,
    /// Fetches that failed; those candidates stay without a profile.
    pub failed: usize,
    /// Candidates that already had a profile.
    pub skipped: usize,
    /// Candidates never started because of cancellation.
    pub not_started: usize,
}

/// Runs a [`ProfileFetcher`] over many candidates with bounded fan-out.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrencyLimiter {
    limit: NonZeroUsize,
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self {
            limit: NonZeroUsize::new(DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl ConcurrencyLimiter {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self { limit }
    }

    /// Maximum concurrent fetches.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Populate `candidates[i].profile` for every candidate lacking one.
    ///
    /// A failed fetch is logged and leaves that candidate's profile empty;
    /// it never aborts sibling fetches. Once `cancel` fires no new fetch is
    /// started, while fetches already running complete and are applied.
    pub async fn run_all<F>(
        &self,
        candidates: &mut [Candidate],
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> FetchSummary
    where
        F: ProfileFetcher + ?Sized,
    {
        let pending: Vec<(usize, String)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.profile.is_none())
            .map(|(idx, c)| (idx, c.username.clone()))
            .collect();

        let mut summary = FetchSummary {
            skipped: candidates.len() - pending.len(),
            ..Default::default()
        };

        if pending.is_empty() {
            return summary;
        }

        let workers = self.limit.get().min(pending.len());
        debug!(
            pending = pending.len(),
            workers = workers,
            "Fetching candidate profiles"
        );

        let cursor = AtomicUsize::new(0);
        let results: Vec<Vec<(usize, Result<Profile, FetchError>)>> = join_all(
            (0..workers).map(|_| Self::worker(&pending, &cursor, fetcher, cancel)),
        )
        .await;

        let mut settled = 0;
        for (idx, result) in results.into_iter().flatten() {
            settled += 1;
            match result {
                Ok(profile) => {
                    metrics::PROFILE_FETCHES
                        .with_label_values(&["success"])
                        .inc();
                    candidates[idx].profile = Some(profile);
                    summary.fetched += 1;
                }
                Err(e) => {
                    metrics::PROFILE_FETCHES.with_label_values(&["failed"]).inc();
                    warn!(
                        username = %candidates[idx].username,
                        error = %e,
                        "Profile fetch failed, candidate excluded from scoring"
                    );
                    summary.failed += 1;
                }
            }
        }

        summary.not_started = pending.len() - settled;
        if summary.not_started > 0 {
            info!(
                not_started = summary.not_started,
                "Profile fetching cancelled"
            );
        }

        summary
    }

    async fn worker<F>(
        pending: &[(usize, String)],
        cursor: &AtomicUsize,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> Vec<(usize, Result<Profile, FetchError>)>
    where
        F: ProfileFetcher + ?Sized,
    {
        let mut out = Vec::new();
        loop {
            if cancel.is_cancelled() {
                break;
            }
            let next = cursor.fetch_add(1, Ordering::SeqCst);
            let Some((idx, username)) = pending.get(next) else {
                break;
            };
            out.push((*idx, fetcher.fetch(username).await));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockProfileFetcher};
    use async_trait::async_trait;
    use std::time::Duration;

    fn limiter(n: usize) -> ConcurrencyLimiter {
        ConcurrencyLimiter::new(NonZeroUsize::new(n).unwrap())
    }

    async fn mock_with(usernames: &[&str]) -> MockProfileFetcher {
        let mock = MockProfileFetcher::new();
        for u in usernames {
            mock.add_profile(fixtures::profile(u, &[("rust", 1.0)]))
                .await;
        }
        mock
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(ConcurrencyLimiter::default().limit(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_respects_concurrency_limit() {
        let names: Vec<String> = (0..10).map(|i| format!("user{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mock = mock_with(&refs).await;
        mock.set_latency(Duration::from_millis(50)).await;

        let mut candidates: Vec<Candidate> = refs.iter().map(|u| Candidate::new(*u)).collect();
        let summary = limiter(3)
            .run_all(&mut candidates, &mock, &CancellationToken::new())
            .await;

        assert_eq!(summary.fetched, 10);
        assert_eq!(mock.max_in_flight(), 3);
        assert!(candidates.iter().all(|c| c.profile.is_some()));
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let mock = mock_with(&["a", "c"]).await;
        mock.fail_for("b").await;

        let mut candidates = vec![Candidate::new("a"), Candidate::new("b"), Candidate::new("c")];
        let summary = limiter(2)
            .run_all(&mut candidates, &mock, &CancellationToken::new())
            .await;

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.failed, 1);
        assert!(candidates[0].profile.is_some());
        assert!(candidates[1].profile.is_none());
        assert!(candidates[2].profile.is_some());
    }

    #[tokio::test]
    async fn test_skips_prefetched_candidates() {
        let mock = mock_with(&["b"]).await;
        let mut candidates = vec![fixtures::candidate("a", &[("go", 2.0)]), Candidate::new("b")];

        let summary = limiter(4)
            .run_all(&mut candidates, &mock, &CancellationToken::new())
            .await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.fetched, 1);
        assert_eq!(mock.calls().await, vec!["b"]);
        assert_eq!(candidates[0].profile.as_ref().unwrap().skills[0].name, "go");
    }

    #[tokio::test]
    async fn test_cancelled_before_start_fetches_nothing() {
        let mock = mock_with(&["a", "b"]).await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut candidates = vec![Candidate::new("a"), Candidate::new("b")];
        let summary = limiter(2).run_all(&mut candidates, &mock, &cancel).await;

        assert_eq!(summary.not_started, 2);
        assert!(mock.calls().await.is_empty());
    }

    /// Cancels the token from inside the first fetch.
    struct CancellingFetcher {
        inner: MockProfileFetcher,
        cancel: CancellationToken,
    }

    #[async_trait]
    impl ProfileFetcher for CancellingFetcher {
        async fn fetch(&self, username: &str) -> Result<Profile, FetchError> {
            self.cancel.cancel();
            self.inner.fetch(username).await
        }
    }

    #[tokio::test]
    async fn test_in_flight_fetch_completes_after_cancel() {
        let cancel = CancellationToken::new();
        let fetcher = CancellingFetcher {
            inner: mock_with(&["a", "b", "c"]).await,
            cancel: cancel.clone(),
        };

        let mut candidates = vec![Candidate::new("a"), Candidate::new("b"), Candidate::new("c")];
        let summary = limiter(1).run_all(&mut candidates, &fetcher, &cancel).await;

        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.not_started, 2);
        assert!(candidates[0].profile.is_some());
        assert!(candidates[1].profile.is_none());
    }
}

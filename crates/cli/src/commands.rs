//! Command implementations. Each returns the JSON text to print on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crewfinder_core::{
    BiosClient, CachedFetcher, Candidate, CandidateInput, ConcurrencyLimiter, Config,
    ProfileCache, ProfileFetcher, SelectionOptions, SkillCatalog, TeamSelector,
};

/// Build the default fetcher: bios HTTP client behind the profile cache.
fn build_fetcher(config: &Config) -> Result<CachedFetcher<BiosClient>> {
    let client = BiosClient::new(config.bios.clone()).context("Failed to create bios client")?;
    let cache = Arc::new(ProfileCache::from_config(&config.cache));
    Ok(CachedFetcher::new(client, cache))
}

/// Read candidates from a JSON file.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates file {:?}", path))?;
    let inputs: Vec<CandidateInput> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse candidates file {:?}", path))?;
    Ok(inputs.into_iter().map(Candidate::from).collect())
}

pub struct SelectArgs {
    pub skills: Vec<String>,
    pub team_size: usize,
    pub concurrency: Option<usize>,
    pub candidates_file: Option<PathBuf>,
    pub usernames: Vec<String>,
}

/// `crewfinder select`
pub async fn select(config: &Config, args: SelectArgs) -> Result<String> {
    let mut candidates = match &args.candidates_file {
        Some(path) => load_candidates(path)?,
        None => Vec::new(),
    };
    candidates.extend(args.usernames.into_iter().map(Candidate::new));

    let options = SelectionOptions {
        concurrency: args.concurrency.unwrap_or(config.selection.concurrency),
        ..config.selection.clone()
    };
    let selector = TeamSelector::new(build_fetcher(config)?, &options)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight fetches");
            on_interrupt.cancel();
        }
    });

    let result = selector
        .select_with_cancel(candidates, args.skills.as_slice(), args.team_size, &cancel)
        .await;
    interrupt.abort();

    let report = result?;
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `crewfinder profile`
pub async fn profile(config: &Config, username: &str) -> Result<String> {
    let fetcher = build_fetcher(config)?;
    let profile = fetcher
        .fetch(username)
        .await
        .with_context(|| format!("Failed to fetch profile for {}", username))?;
    Ok(serde_json::to_string_pretty(&profile)?)
}

/// `crewfinder suggest`
pub async fn suggest(
    config: &Config,
    query: Option<&str>,
    limit: usize,
    users: Vec<String>,
) -> Result<String> {
    let mut catalog = SkillCatalog::default();

    if !users.is_empty() {
        let fetcher = build_fetcher(config)?;
        let mut candidates: Vec<Candidate> = users.into_iter().map(Candidate::new).collect();
        let limiter = match std::num::NonZeroUsize::new(config.selection.concurrency) {
            Some(limit) => ConcurrencyLimiter::new(limit),
            None => ConcurrencyLimiter::default(),
        };
        let summary = limiter
            .run_all(&mut candidates, &fetcher, &CancellationToken::new())
            .await;
        info!(fetched = summary.fetched, failed = summary.failed, "Learned skills from profiles");

        for profile in candidates.iter().filter_map(|c| c.profile.as_ref()) {
            catalog.add_skills(profile.skills.iter().map(|s| s.name.as_str()));
        }
    }

    let suggestions = catalog.suggest(query.unwrap_or_default(), limit);
    Ok(serde_json::to_string_pretty(&suggestions)?)
}

//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Profile fetching (results, latency, cache lookups)
//! - Team selection (runs, team size, coverage)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Profile Fetching Metrics
// =============================================================================

/// Profile fetches total by result.
pub static PROFILE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("crewfinder_profile_fetches_total", "Total profile fetches"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Profile cache lookups by result.
pub static PROFILE_CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "crewfinder_profile_cache_lookups_total",
            "Total profile cache lookups",
        ),
        &["result"], // "hit", "miss", "expired"
    )
    .unwrap()
});

/// Upstream profile request duration in seconds.
pub static PROFILE_FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "crewfinder_profile_fetch_duration_seconds",
            "Duration of upstream profile requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Selection Metrics
// =============================================================================

/// Selection runs started.
pub static SELECTION_RUNS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("crewfinder_selection_runs_total", "Total selection runs").unwrap()
});

/// Members selected per run.
pub static SELECTED_TEAM_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "crewfinder_selected_team_size",
            "Number of members selected per run",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0]),
        &[],
    )
    .unwrap()
});

/// Coverage ratio per run.
pub static COVERAGE_RATIO: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "crewfinder_coverage_ratio",
            "Fraction of required skills covered per run",
        )
        .buckets(vec![0.0, 0.25, 0.5, 0.75, 0.9, 1.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Fetching
        Box::new(PROFILE_FETCHES.clone()),
        Box::new(PROFILE_CACHE_LOOKUPS.clone()),
        Box::new(PROFILE_FETCH_DURATION.clone()),
        // Selection
        Box::new(SELECTION_RUNS.clone()),
        Box::new(SELECTED_TEAM_SIZE.clone()),
        Box::new(COVERAGE_RATIO.clone()),
    ]
}

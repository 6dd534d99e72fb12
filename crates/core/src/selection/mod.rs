//! Team selection.
//!
//! A run has two phases: bounded-parallel profile fetching through the
//! [`ConcurrencyLimiter`](crate::limiter::ConcurrencyLimiter), then a purely
//! sequential greedy loop. Fetching always settles before scoring starts, so
//! the outcome depends only on input order and fetched profiles.
//!
//! # Example
//!
//! ```ignore
//! use crewfinder_core::{select_team_greedy, BiosClient, BiosConfig, Candidate, SelectionOptions};
//!
//! let fetcher = BiosClient::new(BiosConfig::default())?;
//! let report = select_team_greedy(
//!     vec![Candidate::new("torrenegra")],
//!     &["leadership", "entrepreneurship"],
//!     1,
//!     fetcher,
//!     &SelectionOptions::default(),
//! )
//! .await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod greedy;
mod report;
mod types;

pub use greedy::{select_team_greedy, GreedyRun, TeamSelector};
pub use report::{assemble_report, CoverageSummary, SelectionReport, TeamMember};
pub use types::{SelectionError, SelectionOptions};

//! Greedy maximum-coverage team selection.
//!
//! Each step scores every not-yet-selected candidate against the skills
//! still uncovered and commits the highest scorer. Ties go to the earliest
//! candidate in input order. The loop stops when the team is full, nothing
//! is left to cover, or no remaining candidate adds coverage.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::report::{assemble_report, SelectionReport, TeamMember};
use super::types::{SelectionError, SelectionOptions};
use crate::coverage::{score, CandidateScore, CoverageEntry, ProficiencyWeights, RequiredSkillSet};
use crate::limiter::ConcurrencyLimiter;
use crate::metrics;
use crate::profile::{Candidate, ProfileFetcher};

/// State of one greedy run over candidates whose fetching has settled.
pub struct GreedyRun<'a> {
    candidates: &'a [Candidate],
    weights: &'a ProficiencyWeights,
    required_skill_count: usize,
    uncovered: RequiredSkillSet,
    covered: Vec<CoverageEntry>,
    selected: Vec<bool>,
    team: Vec<TeamMember>,
}

impl<'a> GreedyRun<'a> {
    pub fn new(
        candidates: &'a [Candidate],
        required: RequiredSkillSet,
        weights: &'a ProficiencyWeights,
    ) -> Self {
        Self {
            candidates,
            weights,
            required_skill_count: required.len(),
            uncovered: required,
            covered: Vec::new(),
            selected: vec![false; candidates.len()],
            team: Vec::new(),
        }
    }

    /// Skills not covered so far.
    pub fn uncovered(&self) -> &RequiredSkillSet {
        &self.uncovered
    }

    /// Members selected so far, in selection order.
    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    /// Select the next member.
    ///
    /// Returns `None` without changing state when nothing is left to cover
    /// or the best remaining candidate scores zero.
    pub fn step(&mut self) -> Option<&TeamMember> {
        if self.uncovered.is_empty() {
            return None;
        }

        let mut best: Option<(usize, CandidateScore)> = None;
        for (idx, candidate) in self.candidates.iter().enumerate() {
            if self.selected[idx] {
                continue;
            }
            let scored = score(candidate, &self.uncovered, self.weights);
            let best_score = best.as_ref().map_or(0.0, |(_, s)| s.total_score);
            if scored.total_score > best_score {
                best = Some((idx, scored));
            }
        }

        let (idx, scored) = best?;
        let candidate = &self.candidates[idx];

        for entry in &scored.entries {
            self.uncovered.remove(&entry.skill);
        }
        self.covered.extend(scored.entries.iter().cloned());
        self.selected[idx] = true;

        debug!(
            username = %candidate.username,
            score = scored.total_score,
            remaining = self.uncovered.len(),
            "Selected team member"
        );

        self.team.push(TeamMember {
            username: candidate.username.clone(),
            display_name: candidate
                .profile
                .as_ref()
                .map(|p| p.name_or_username().to_string())
                .unwrap_or_else(|| candidate.username.clone()),
            skills_contributed: scored.entries,
            contribution_score: scored.total_score,
        });
        self.team.last()
    }

    /// Run up to `team_size` steps and build the report.
    pub fn run(mut self, team_size: usize) -> SelectionReport {
        while self.team.len() < team_size && self.step().is_some() {}
        self.finish()
    }

    /// Build the report from the current state.
    pub fn finish(self) -> SelectionReport {
        assemble_report(
            self.team,
            self.covered,
            self.uncovered,
            self.required_skill_count,
        )
    }
}

/// Fetch-then-select driver.
pub struct TeamSelector<F: ProfileFetcher> {
    fetcher: F,
    limiter: ConcurrencyLimiter,
    weights: ProficiencyWeights,
}

impl<F: ProfileFetcher> TeamSelector<F> {
    /// Create a selector. Fails when `options.concurrency` is zero.
    pub fn new(fetcher: F, options: &SelectionOptions) -> Result<Self, SelectionError> {
        let limit = NonZeroUsize::new(options.concurrency).ok_or_else(|| {
            SelectionError::InvalidInput("concurrency must be at least 1".to_string())
        })?;

        Ok(Self {
            fetcher,
            limiter: ConcurrencyLimiter::new(limit),
            weights: options.weights(),
        })
    }

    /// The wrapped fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Select up to `team_size` members covering `required_skills`.
    pub async fn select<S: AsRef<str>>(
        &self,
        candidates: Vec<Candidate>,
        required_skills: &[S],
        team_size: usize,
    ) -> Result<SelectionReport, SelectionError> {
        self.select_with_cancel(
            candidates,
            required_skills,
            team_size,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like [`TeamSelector::select`], stopping new profile fetches once
    /// `cancel` fires. Selection then runs over whatever was fetched.
    pub async fn select_with_cancel<S: AsRef<str>>(
        &self,
        mut candidates: Vec<Candidate>,
        required_skills: &[S],
        team_size: usize,
        cancel: &CancellationToken,
    ) -> Result<SelectionReport, SelectionError> {
        validate_input(&candidates, required_skills)?;
        metrics::SELECTION_RUNS.inc();

        let required = RequiredSkillSet::new(required_skills);
        if team_size == 0 {
            return Ok(SelectionReport::empty_team(required));
        }

        info!(
            candidates = candidates.len(),
            required_skills = required.len(),
            team_size = team_size,
            "Starting team selection"
        );

        if !required.is_empty() {
            let summary = self
                .limiter
                .run_all(&mut candidates, &self.fetcher, cancel)
                .await;
            debug!(?summary, "Profile fetching settled");
        }

        let report = GreedyRun::new(&candidates, required, &self.weights).run(team_size);

        metrics::SELECTED_TEAM_SIZE
            .with_label_values(&[])
            .observe(report.team.len() as f64);
        metrics::COVERAGE_RATIO
            .with_label_values(&[])
            .observe(report.coverage.coverage_ratio);
        info!(
            team = report.team.len(),
            coverage_ratio = report.coverage.coverage_ratio,
            uncovered = report.coverage.uncovered_skills.len(),
            "Team selection finished"
        );

        Ok(report)
    }
}

/// Convenience entry point: build a [`TeamSelector`] and run it once.
pub async fn select_team_greedy<F, S>(
    candidates: Vec<Candidate>,
    required_skills: &[S],
    team_size: usize,
    fetcher: F,
    options: &SelectionOptions,
) -> Result<SelectionReport, SelectionError>
where
    F: ProfileFetcher,
    S: AsRef<str>,
{
    TeamSelector::new(fetcher, options)?
        .select(candidates, required_skills, team_size)
        .await
}

fn validate_input<S: AsRef<str>>(
    candidates: &[Candidate],
    required_skills: &[S],
) -> Result<(), SelectionError> {
    let mut seen = HashSet::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        if candidate.username.trim().is_empty() {
            return Err(SelectionError::InvalidInput(format!(
                "candidate at position {idx} has an empty username"
            )));
        }
        if !seen.insert(candidate.username.as_str()) {
            return Err(SelectionError::InvalidInput(format!(
                "duplicate candidate username: {}",
                candidate.username
            )));
        }
    }

    for (idx, skill) in required_skills.iter().enumerate() {
        if skill.as_ref().trim().is_empty() {
            return Err(SelectionError::InvalidInput(format!(
                "required skill at position {idx} is empty"
            )));
        }
    }

    Ok(())
}

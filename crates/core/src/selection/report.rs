//! Selection report assembly.

use serde::{Deserialize, Serialize};

use crate::coverage::{CoverageEntry, RequiredSkillSet};

/// A selected team member and what they cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub username: String,
    pub display_name: String,
    pub skills_contributed: Vec<CoverageEntry>,
    /// Sum of the weights in `skills_contributed`.
    pub contribution_score: f64,
}

/// Coverage statistics of a selected team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    /// Number of required skills after de-duplication.
    pub required_skill_count: usize,
    pub covered_skills: Vec<CoverageEntry>,
    pub uncovered_skills: Vec<String>,
    pub coverage_ratio: f64,
    pub total_contribution_score: f64,
}

/// Result of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub team: Vec<TeamMember>,
    pub coverage: CoverageSummary,
}

impl SelectionReport {
    /// Report for a run that never selects anyone (team size zero).
    ///
    /// The ratio is 0 even with no required skills.
    pub fn empty_team(required: RequiredSkillSet) -> Self {
        Self {
            team: Vec::new(),
            coverage: CoverageSummary {
                required_skill_count: required.len(),
                covered_skills: Vec::new(),
                uncovered_skills: required.into_vec(),
                coverage_ratio: 0.0,
                total_contribution_score: 0.0,
            },
        }
    }
}

/// Package a finished greedy run into a [`SelectionReport`].
pub fn assemble_report(
    team: Vec<TeamMember>,
    covered: Vec<CoverageEntry>,
    uncovered: RequiredSkillSet,
    required_skill_count: usize,
) -> SelectionReport {
    let uncovered_skills = uncovered.into_vec();
    let coverage_ratio = if required_skill_count == 0 {
        1.0
    } else {
        (required_skill_count - uncovered_skills.len()) as f64 / required_skill_count as f64
    };
    let total_contribution_score = team.iter().map(|m| m.contribution_score).sum();

    SelectionReport {
        team,
        coverage: CoverageSummary {
            required_skill_count,
            covered_skills: covered,
            uncovered_skills,
            coverage_ratio,
            total_contribution_score,
        },
    }
}

//! Skill coverage scoring.
//!
//! Scores one candidate against the set of still-uncovered required skills.
//! Pure: no I/O, no shared state.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::profile::{Candidate, Skill};

/// Proficiency label recorded when a skill carries none.
pub const UNKNOWN_PROFICIENCY: &str = "unknown";

/// Weight used when neither an explicit weight nor a known label applies.
pub const FALLBACK_WEIGHT: f64 = 1.0;

/// Ordinal mapping from proficiency labels to weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyWeights(HashMap<String, f64>);

impl Default for ProficiencyWeights {
    fn default() -> Self {
        let table = [
            ("novice", 1.0),
            ("beginner", 1.0),
            ("basic", 1.0),
            ("intermediate", 2.0),
            ("proficient", 3.0),
            ("advanced", 4.0),
            ("expert", 5.0),
            ("master", 6.0),
        ];
        Self(
            table
                .into_iter()
                .map(|(label, w)| (label.to_string(), w))
                .collect(),
        )
    }
}

impl ProficiencyWeights {
    /// Default table with `overrides` merged on top. Labels are lower-cased.
    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Self {
        let mut weights = Self::default();
        for (label, weight) in overrides {
            weights.0.insert(label.to_lowercase(), *weight);
        }
        weights
    }

    /// Weight for a label, if the label is known.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(&label.to_lowercase()).copied()
    }

    /// Effective weight of a skill: explicit weight, then label, then 1.
    ///
    /// Zero and NaN count as absent. Negative values are kept and lower the
    /// candidate's score.
    pub fn weight_of(&self, skill: &Skill) -> f64 {
        skill
            .weight
            .filter(|w| usable(*w))
            .or_else(|| {
                skill
                    .proficiency
                    .as_deref()
                    .and_then(|p| self.get(p))
                    .filter(|w| usable(*w))
            })
            .unwrap_or(FALLBACK_WEIGHT)
    }
}

fn usable(weight: f64) -> bool {
    !weight.is_nan() && weight != 0.0
}

/// Case-insensitive, de-duplicated set of skill names.
///
/// Iteration follows first-seen input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredSkillSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl RequiredSkillSet {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for skill in skills {
            let key = skill.as_ref().to_lowercase();
            if set.members.insert(key.clone()) {
                set.order.push(key);
            }
        }
        set
    }

    /// Membership test for an already lower-cased name.
    pub fn contains(&self, key: &str) -> bool {
        self.members.contains(key)
    }

    /// Remove a lower-cased name. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.members.remove(key) {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// One required skill satisfied by one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageEntry {
    /// Lower-cased skill name.
    pub skill: String,
    pub proficiency: String,
    pub weight: f64,
    /// Username of the covering candidate.
    pub covered_by: String,
}

/// What a candidate would add to the team right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateScore {
    pub entries: Vec<CoverageEntry>,
    pub total_score: f64,
}

/// Score `candidate` against the skills still uncovered.
///
/// A candidate listing the same skill more than once contributes it once,
/// at its first occurrence. Candidates without a profile score zero.
pub fn score(
    candidate: &Candidate,
    uncovered: &RequiredSkillSet,
    weights: &ProficiencyWeights,
) -> CandidateScore {
    let Some(profile) = &candidate.profile else {
        return CandidateScore::default();
    };

    let mut seen = HashSet::new();
    let mut result = CandidateScore::default();

    for skill in &profile.skills {
        if skill.name.is_empty() {
            continue;
        }
        let key = skill.key();
        if !uncovered.contains(&key) || !seen.insert(key.clone()) {
            continue;
        }

        let weight = weights.weight_of(skill);
        result.total_score += weight;
        result.entries.push(CoverageEntry {
            skill: key,
            proficiency: skill
                .proficiency
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| UNKNOWN_PROFICIENCY.to_string()),
            weight,
            covered_by: candidate.username.clone(),
        });
    }

    result
}

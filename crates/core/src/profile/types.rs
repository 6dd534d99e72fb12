//! Types for candidate profiles and the upstream genome payload.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Domain Types
// ============================================================================

/// A named skill ("strength") a person has.
///
/// Names are matched case-insensitively: two skills whose lower-cased names
/// are equal are the same skill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    /// Skill name as reported upstream.
    pub name: String,
    /// Qualitative level label (e.g. "expert").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<String>,
    /// Explicit numeric weight. Takes precedence over `proficiency`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "numeric_or_none"
    )]
    pub weight: Option<f64>,
}

impl Skill {
    /// Create a skill with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            proficiency: None,
            weight: None,
        }
    }

    /// Set the proficiency label.
    pub fn with_proficiency(mut self, proficiency: impl Into<String>) -> Self {
        self.proficiency = Some(proficiency.into());
        self
    }

    /// Set the explicit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Lower-cased name used for matching.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A fetched profile. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique identity.
    pub username: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Weighted skill list.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Profile {
    /// Build a profile from the upstream genome payload.
    ///
    /// Strengths without a usable name are dropped.
    pub fn from_genome(username: &str, genome: GenomeResponse) -> Self {
        let display_name = genome
            .person
            .and_then(|p| p.name)
            .filter(|n| !n.trim().is_empty());

        let skills = genome
            .strengths
            .into_iter()
            .filter_map(|s| {
                let name = s.name.filter(|n| !n.trim().is_empty())?;
                Some(Skill {
                    name,
                    proficiency: s.proficiency.filter(|p| !p.trim().is_empty()),
                    weight: s.weight,
                })
            })
            .collect();

        Self {
            username: username.to_string(),
            display_name,
            skills,
        }
    }

    /// Display name, falling back to the username.
    pub fn name_or_username(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// A person considered for the team, with a lazily-populated profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub username: String,
    pub profile: Option<Profile>,
}

impl Candidate {
    /// A candidate whose profile still has to be fetched.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: None,
        }
    }

    /// A candidate with a pre-fetched profile.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            username: profile.username.clone(),
            profile: Some(profile),
        }
    }
}

impl From<&str> for Candidate {
    fn from(username: &str) -> Self {
        Candidate::new(username)
    }
}

impl From<String> for Candidate {
    fn from(username: String) -> Self {
        Candidate::new(username)
    }
}

/// Candidate as accepted from JSON input: a bare username or a username with
/// a pre-fetched genome.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateInput {
    Username(String),
    Detailed {
        username: String,
        #[serde(default)]
        genome: Option<GenomeResponse>,
    },
}

impl From<CandidateInput> for Candidate {
    fn from(input: CandidateInput) -> Self {
        match input {
            CandidateInput::Username(username) => Candidate::new(username),
            CandidateInput::Detailed {
                username,
                genome: Some(genome),
            } => Candidate {
                profile: Some(Profile::from_genome(&username, genome)),
                username,
            },
            CandidateInput::Detailed {
                username,
                genome: None,
            } => Candidate::new(username),
        }
    }
}

// ============================================================================
// Upstream Genome Payload
// ============================================================================

/// Minimal shape of a genome bios response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenomeResponse {
    #[serde(default)]
    pub person: Option<GenomePerson>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strengths: Vec<GenomeStrength>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenomePerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenomeStrength {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub proficiency: Option<String>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub weight: Option<f64>,
}

/// Treat an explicit `null` list like a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON value, keeping it only if it is a number.
fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_genome() {
        let json = r#"{
            "person": { "name": "Ada Lovelace", "username": "ada" },
            "strengths": [
                { "name": "Mathematics", "proficiency": "master", "weight": 12.5 },
                { "name": "Poetry", "proficiency": "novice" },
                { "name": "", "proficiency": "expert" },
                { "proficiency": "expert" }
            ]
        }"#;
        let genome: GenomeResponse = serde_json::from_str(json).unwrap();
        let profile = Profile::from_genome("ada", genome);

        assert_eq!(profile.username, "ada");
        assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.skills[0].weight, Some(12.5));
        assert_eq!(profile.skills[1].weight, None);
    }

    #[test]
    fn test_non_numeric_weight_is_absent() {
        let json = r#"{ "strengths": [{ "name": "Rust", "weight": "heavy" }] }"#;
        let genome: GenomeResponse = serde_json::from_str(json).unwrap();
        let profile = Profile::from_genome("x", genome);
        assert_eq!(profile.skills[0].weight, None);
        assert_eq!(profile.name_or_username(), "x");
    }

    #[test]
    fn test_empty_genome() {
        let genome: GenomeResponse = serde_json::from_str("{}").unwrap();
        let profile = Profile::from_genome("ghost", genome);
        assert!(profile.skills.is_empty());
        assert!(profile.display_name.is_none());
    }

    #[test]
    fn test_null_fields_are_tolerated() {
        let json = r#"{ "person": { "name": null, "username": null }, "strengths": null }"#;
        let genome: GenomeResponse = serde_json::from_str(json).unwrap();
        let profile = Profile::from_genome("x", genome);
        assert!(profile.skills.is_empty());
        assert_eq!(profile.name_or_username(), "x");

        let genome: GenomeResponse =
            serde_json::from_str(r#"{ "person": null, "strengths": null }"#).unwrap();
        assert!(genome.person.is_none());
        assert!(genome.strengths.is_empty());
    }

    #[test]
    fn test_blank_proficiency_is_absent() {
        let json = r#"{ "strengths": [{ "name": "Rust", "proficiency": "", "weight": null }] }"#;
        let genome: GenomeResponse = serde_json::from_str(json).unwrap();
        let profile = Profile::from_genome("x", genome);
        assert_eq!(profile.skills[0].proficiency, None);
        assert_eq!(profile.skills[0].weight, None);
    }

    #[test]
    fn test_candidate_input_forms() {
        let json = r#"[
            "alice",
            { "username": "bob" },
            { "username": "carol", "genome": { "strengths": [{ "name": "Go" }] } }
        ]"#;
        let inputs: Vec<CandidateInput> = serde_json::from_str(json).unwrap();
        let candidates: Vec<Candidate> = inputs.into_iter().map(Candidate::from).collect();

        assert_eq!(candidates[0], Candidate::new("alice"));
        assert_eq!(candidates[1], Candidate::new("bob"));
        let carol = candidates[2].profile.as_ref().unwrap();
        assert_eq!(carol.username, "carol");
        assert_eq!(carol.skills[0].key(), "go");
    }

    #[test]
    fn test_skill_key_is_lowercase() {
        assert_eq!(Skill::new("TypeScript").key(), "typescript");
    }
}

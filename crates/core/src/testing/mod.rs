//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use crewfinder_core::testing::{fixtures, MockProfileFetcher};
//!
//! let fetcher = MockProfileFetcher::new();
//! fetcher.add_profile(fixtures::profile("ada", &[("rust", 5.0)])).await;
//! fetcher.fail_for("bob").await;
//! ```

mod mock_profile_fetcher;

pub use mock_profile_fetcher::MockProfileFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::profile::{Candidate, Profile, Skill};

    /// A skill with an explicit weight.
    pub fn skill(name: &str, weight: f64) -> Skill {
        Skill::new(name).with_weight(weight)
    }

    /// A skill with only a proficiency label.
    pub fn skill_at(name: &str, proficiency: &str) -> Skill {
        Skill::new(name).with_proficiency(proficiency)
    }

    /// A profile whose skills carry explicit weights.
    pub fn profile(username: &str, skills: &[(&str, f64)]) -> Profile {
        profile_with_skills(
            username,
            skills.iter().map(|(n, w)| skill(n, *w)).collect(),
        )
    }

    /// A profile with arbitrary skills.
    pub fn profile_with_skills(username: &str, skills: Vec<Skill>) -> Profile {
        Profile {
            username: username.to_string(),
            display_name: Some(format!("{} (test)", username)),
            skills,
        }
    }

    /// A candidate with a pre-fetched profile.
    pub fn candidate(username: &str, skills: &[(&str, f64)]) -> Candidate {
        Candidate::with_profile(profile(username, skills))
    }
}

//! Options and errors for team selection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coverage::ProficiencyWeights;
use crate::limiter::DEFAULT_CONCURRENCY;

/// Errors surfaced by a selection run.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    /// Malformed candidates, required skills or options.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Tunables for a selection run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionOptions {
    /// Maximum parallel profile fetches (must be >= 1).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Proficiency label weights merged over the default table.
    #[serde(default)]
    pub proficiency_weights: HashMap<String, f64>,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            proficiency_weights: HashMap::new(),
        }
    }
}

impl SelectionOptions {
    /// Effective proficiency table.
    pub fn weights(&self) -> ProficiencyWeights {
        ProficiencyWeights::with_overrides(&self.proficiency_weights)
    }
}

use serde::{Deserialize, Serialize};

use crate::profile::{BiosConfig, CacheConfig};
use crate::selection::SelectionOptions;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bios: BiosConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub selection: SelectionOptions,
}

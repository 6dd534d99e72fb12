pub mod catalog;
pub mod config;
pub mod coverage;
pub mod limiter;
pub mod metrics;
pub mod profile;
pub mod selection;
pub mod testing;

pub use catalog::{normalize_skill, SkillCatalog, DEFAULT_SUGGEST_LIMIT};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
};
pub use coverage::{
    score, CandidateScore, CoverageEntry, ProficiencyWeights, RequiredSkillSet,
};
pub use limiter::{ConcurrencyLimiter, FetchSummary, DEFAULT_CONCURRENCY};
pub use profile::{
    BiosClient, BiosConfig, CacheConfig, CachedFetcher, Candidate, CandidateInput, FetchError,
    GenomeResponse, Profile, ProfileCache, ProfileFetcher, Skill,
};
pub use selection::{
    assemble_report, select_team_greedy, CoverageSummary, GreedyRun, SelectionError,
    SelectionOptions, SelectionReport, TeamMember, TeamSelector,
};

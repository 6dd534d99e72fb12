use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Bios base URL is set and timeout is not 0
/// - Cache TTL is not 0
/// - Selection concurrency is at least 1
/// - Proficiency weight overrides are finite and not negative
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.bios.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "bios.base_url cannot be empty".to_string(),
        ));
    }
    if config.bios.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "bios.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs cannot be 0".to_string(),
        ));
    }

    if config.selection.concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "selection.concurrency must be at least 1".to_string(),
        ));
    }
    for (label, weight) in &config.selection.proficiency_weights {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "selection.proficiency_weights.{} must be a non-negative number",
                label
            )));
        }
    }

    Ok(())
}

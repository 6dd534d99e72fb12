use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides, e.g. `CREWFINDER_SELECTION__CONCURRENCY`.
pub const ENV_PREFIX: &str = "CREWFINDER_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    figment_with(Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path)))
}

/// Defaults plus environment overrides, for running without a config file
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    figment_with(Figment::from(Serialized::defaults(Config::default())))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn figment_with(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[selection]
concurrency = 8

[selection.proficiency_weights]
expert = 7.0

[cache]
ttl_secs = 60
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.selection.concurrency, 8);
        assert_eq!(config.selection.proficiency_weights.get("expert"), Some(&7.0));
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.max_entries, 0);
        assert_eq!(config.bios.base_url, "https://torre.ai/api/genome/bios");
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.selection.concurrency, 4);
        assert_eq!(config.cache.ttl_secs, 600);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[selection]
concurrency = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/crewfinder.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[bios]
base_url = "http://localhost:9000/bios"
timeout_secs = 5

[cache]
max_entries = 100
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.bios.base_url, "http://localhost:9000/bios");
        assert_eq!(config.bios.timeout_secs, 5);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.cache.ttl_secs, 600);
    }
}

//! Configuration for the CLI.
//!
//! Read from `config.json` in the platform config directory, then
//! overridden by environment variables:
//! - `NTIID_PROVIDER`: default provider for `make`
//! - `NTIID_SALT`: default salt for `hash` and `truncate`
//! - `NTIID_MAX_SPECIFIC`: default bound on specific length for `make`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    ProjectDirs::from("com", "nextthought", "ntiid")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Provider used by `make` when `--provider` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Salt used by `hash` and `truncate` when `--salt` is not given.
    #[serde(default)]
    pub salt: String,

    /// Longest specific part `make` emits before hashing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_specific_len: Option<usize>,
}

impl Config {
    /// Load config from disk (or defaults), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(provider) = lookup("NTIID_PROVIDER").filter(|p| !p.is_empty()) {
            self.provider = Some(provider);
        }

        if let Some(salt) = lookup("NTIID_SALT") {
            self.salt = salt;
        }

        if let Some(max) = lookup("NTIID_MAX_SPECIFIC") {
            let max = max
                .parse()
                .with_context(|| format!("NTIID_MAX_SPECIFIC must be a number, got '{max}'"))?;
            self.max_specific_len = Some(max);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.provider.is_none());
        assert!(config.salt.is_empty());
        assert!(config.max_specific_len.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            provider: Some("FromFile".to_string()),
            ..Config::default()
        };
        config
            .apply_env(|key| match key {
                "NTIID_PROVIDER" => Some("NTI".to_string()),
                "NTIID_MAX_SPECIFIC" => Some("120".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.provider.as_deref(), Some("NTI"));
        assert_eq!(config.max_specific_len, Some(120));
        assert!(config.salt.is_empty());
    }

    #[test]
    fn test_bad_max_specific_rejected() {
        let mut config = Config::default();
        let result =
            config.apply_env(|key| (key == "NTIID_MAX_SPECIFIC").then(|| "lots".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_parses() {
        let config: Config = serde_json::from_str(r#"{ "salt": "pepper" }"#).unwrap();
        assert_eq!(config.salt, "pepper");
        assert!(config.provider.is_none());
    }
}

//! Application settings configuration
//!
//! Defines where policy is stored and how inbound events are filtered.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Policy storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// JSON file holding the threshold policy
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("cert-expiry-watch.json")
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Event pipeline settings
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSettings {
    /// Ignore responses whose URL is not https
    #[serde(default = "default_true")]
    pub https_only: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { https_only: true }
    }
}

/// Policy bootstrap settings
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySettings {
    /// Write the fallback threshold as global default when none is set
    #[serde(default = "default_true")]
    pub seed_default: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self { seed_default: true }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default)]
    pub policy: PolicySettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.store.path, PathBuf::from("cert-expiry-watch.json"));
        assert!(settings.watch.https_only);
        assert!(settings.policy.seed_default);
    }

    #[test]
    fn test_partial_config() {
        let settings = Settings::from_toml(
            r#"
            [store]
            path = "/var/lib/watch/policy.json"

            [watch]
            https_only = false
            "#,
        )
        .unwrap();
        assert_eq!(settings.store.path, PathBuf::from("/var/lib/watch/policy.json"));
        assert!(!settings.watch.https_only);
        assert!(settings.policy.seed_default);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Settings::from_toml("[store]\npath = 5"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::load_from_file("no/such/config.toml"),
            Err(ConfigError::FileNotFound { .. })
        ));
    }
}

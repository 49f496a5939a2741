//! Application configuration
//!
//! Configuration loaded from `.hacktoberfest-cli.toml`, with environment
//! variables taking precedence over file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment variables overriding config keys
pub const ENV_PREFIX: &str = "HACKTOBERFEST_";

/// Application configuration loaded from `.hacktoberfest-cli.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// OAuth app client id (`HACKTOBERFEST_CLIENT_ID`)
    #[serde(default)]
    pub client_id: String,

    /// OAuth app client secret (`HACKTOBERFEST_CLIENT_SECRET`)
    #[serde(default)]
    pub client_secret: String,

    /// GitHub login whose pull requests are listed
    #[serde(default = "default_author")]
    pub author: String,

    /// Creation date range in search syntax, e.g. `2018-09-30..2018-11-01`
    #[serde(default = "default_created")]
    pub created: String,

    /// Local port the OAuth callback listener binds to
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,
}

/// Result of resolving the configuration
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
}

fn default_author() -> String {
    "tomlazar".to_string()
}

fn default_created() -> String {
    "2018-09-30..2018-11-01".to_string()
}

fn default_callback_port() -> u16 {
    14565
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            author: default_author(),
            created: default_created(),
            callback_port: default_callback_port(),
        }
    }
}

impl AppConfig {
    /// Load config from the explicit path or the home directory, then apply
    /// `HACKTOBERFEST_*` environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let file = crate::load_config_file(explicit)?;

        let (mut config, source) = match file {
            Some(file) => {
                let config = Self::parse(&file.content)
                    .with_context(|| format!("Failed to parse {}", file.path.display()))?;
                log::info!("Loaded app config from {}", file.path.display());
                (config, Some(file.path))
            }
            None => {
                log::debug!("Using default app config");
                (Self::default(), None)
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(LoadedConfig { config, source })
    }

    /// Parse TOML config content; missing keys fall back to defaults
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override file values with `HACKTOBERFEST_<KEY>` variables
    ///
    /// `lookup` maps a variable name to its value; empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let name = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            lookup(&name).filter(|v| !v.is_empty()).map(|v| (name, v))
        };

        if let Some((_, v)) = var("client_id") {
            self.client_id = v;
        }
        if let Some((_, v)) = var("client_secret") {
            self.client_secret = v;
        }
        if let Some((_, v)) = var("author") {
            self.author = v;
        }
        if let Some((_, v)) = var("created") {
            self.created = v;
        }
        if let Some((name, v)) = var("callback_port") {
            self.callback_port = v
                .parse()
                .with_context(|| format!("{} must be a port number, got '{}'", name, v))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.author, "tomlazar");
        assert_eq!(config.created, "2018-09-30..2018-11-01");
        assert_eq!(config.callback_port, 14565);
        assert!(config.client_id.is_empty());
        assert!(config.client_secret.is_empty());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            author = "octocat"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.author, "octocat");
        // Other fields should use defaults
        assert_eq!(config.created, "2018-09-30..2018-11-01");
        assert_eq!(config.callback_port, 14565);
    }

    #[test]
    fn test_config_deserialize_invalid() {
        assert!(AppConfig::parse("callback_port = \"not a number\"").is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::parse(
            r#"
            client_id = "from-file"
            author = "file-author"
        "#,
        )
        .unwrap();

        config
            .apply_env_overrides(env(&[
                ("HACKTOBERFEST_CLIENT_ID", "from-env"),
                ("HACKTOBERFEST_CLIENT_SECRET", "secret"),
                ("HACKTOBERFEST_CALLBACK_PORT", "7000"),
            ]))
            .unwrap();

        assert_eq!(config.client_id, "from-env");
        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.author, "file-author");
        assert_eq!(config.callback_port, 7000);
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[("HACKTOBERFEST_AUTHOR", "")]))
            .unwrap();
        assert_eq!(config.author, "tomlazar");
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let mut config = AppConfig::default();
        let result =
            config.apply_env_overrides(env(&[("HACKTOBERFEST_CALLBACK_PORT", "seven")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "created = \"2024-10-01..2024-10-31\"\n").unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.created, "2024-10-01..2024-10-31");
    }

    #[test]
    fn test_load_malformed_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "author = [").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }
}

//! Configuration for the herokron CLI
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (herokron.toml)
//! - Environment variables (HEROKRON__*)
//!
//! ## Example config file (herokron.toml):
//! ```toml
//! [database]
//! path = "/home/me/.local/share/Herokron/db.json"
//!
//! [heroku]
//! api_url = "https://api.heroku.com"
//! timeout_secs = 30
//! user_agent = "herokron/0.1.0"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::paths;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HerokronConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Heroku Platform API settings
    #[serde(default)]
    pub heroku: HerokuConfig,
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backing file; the platform default is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Heroku client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerokuConfig {
    /// Platform API root
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.heroku.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("herokron/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HerokuConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HerokronConfig {
    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["herokron.toml", ".herokron.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("com", "Hexiro", "Herokron") {
            let user_config = dirs.config_dir().join("herokron.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // HEROKRON__HEROKU__TIMEOUT_SECS=10
        builder = builder.add_source(
            Environment::with_prefix("HEROKRON")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Configured database path, or the platform default
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => paths::default_database_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HerokronConfig::default();
        assert!(config.database.path.is_none());
        assert_eq!(config.heroku.api_url, "https://api.heroku.com");
        assert_eq!(config.heroku.timeout_secs, 30);
        assert!(config.heroku.user_agent.starts_with("herokron/"));
    }

    #[test]
    fn test_serialize_config() {
        let config = HerokronConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[heroku]"));
        assert!(toml_str.contains("api_url"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"/tmp/herokron/db.json\"\n\n[heroku]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = HerokronConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.heroku.timeout_secs, 5);
        assert_eq!(config.heroku.api_url, "https://api.heroku.com");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/herokron/db.json")
        );
    }
}

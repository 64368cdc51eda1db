//! Application configuration
//!
//! Layered lowest to highest: built-in defaults, the YAML file,
//! `CIDLOOKUP__*` environment variables, then command-line flags.

use crate::cli::Cli;
use anyhow::Context;
use cidlookup_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cidlookup.yaml";

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "CIDLOOKUP";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// C-ID table to load
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Rows printed per result before truncating
    #[serde(default = "default_max_display_results")]
    pub max_display_results: usize,

    /// Characters of title shown in course listings
    #[serde(default = "default_title_display_len")]
    pub title_display_len: usize,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_display_results: default_max_display_results(),
            title_display_len: default_title_display_len(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment, then apply CLI overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config.clone().or_else(default_config_path);
        let mut config = Self::from_sources(path.as_deref())?;

        if let Some(data) = &cli.data {
            config.data_file = data.clone();
        }
        if let Some(home) = &cli.home {
            config.engine.home_institution = home.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge an optional YAML file with `CIDLOOKUP__*` environment variables
    pub fn from_sources(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Load from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_display_results == 0 {
            anyhow::bail!("max_display_results must be at least 1");
        }
        self.engine.validate()?;
        Ok(())
    }
}

/// `./cidlookup.yaml` if present, else `<config dir>/cidlookup/config.yaml`
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("cidlookup").join("config.yaml"))
}

fn default_data_file() -> PathBuf {
    PathBuf::from("cid.csv")
}

fn default_max_display_results() -> usize {
    2000
}

fn default_title_display_len() -> usize {
    40
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_file, PathBuf::from("cid.csv"));
        assert_eq!(config.max_display_results, 2000);
        assert_eq!(config.title_display_len, 40);
        assert_eq!(config.engine.home_institution, "De Anza College");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
data_file: /srv/cid/latest.csv
engine:
  home_institution: Foothill College
  classifier:
    stopwords: [and, of]
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/srv/cid/latest.csv"));
        assert_eq!(config.max_display_results, 2000);
        assert_eq!(config.engine.home_institution, "Foothill College");
        assert_eq!(config.engine.classifier.stopwords, vec!["and", "of"]);
        assert_eq!(config.engine.classifier.title_ratio, 10);
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cidlookup.yaml");
        std::fs::write(
            &path,
            "max_display_results: 50\nengine:\n  min_query_chars: 3\n",
        )
        .unwrap();

        let config = AppConfig::from_sources(Some(&path)).unwrap();
        assert_eq!(config.max_display_results, 50);
        assert_eq!(config.engine.min_query_chars, 3);
        assert_eq!(config.engine.home_institution, "De Anza College");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_sources(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert_eq!(config.title_display_len, 40);
    }

    #[test]
    fn test_zero_display_limit_is_rejected() {
        let config = AppConfig {
            max_display_results: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

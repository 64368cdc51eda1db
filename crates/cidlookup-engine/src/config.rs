//! Engine configuration

use cidlookup_classifiers::ClassifierConfig;
use cidlookup_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the lookup engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Institution whose rows lead results and whose courses can be browsed
    #[serde(default = "default_home_institution")]
    pub home_institution: String,

    /// Trimmed queries shorter than this return nothing
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Keyword classification policy
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_institution: default_home_institution(),
            min_query_chars: default_min_query_chars(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.home_institution.trim().is_empty() {
            return Err(Error::config("home_institution must not be empty"));
        }
        self.classifier.validate()
    }
}

fn default_home_institution() -> String {
    "De Anza College".to_string()
}

fn default_min_query_chars() -> usize {
    2
}

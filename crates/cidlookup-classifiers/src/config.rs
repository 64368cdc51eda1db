//! Policy values for keyword classification

use cidlookup_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Words that are never treated as department codes
pub const DEFAULT_STOPWORDS: [&str; 12] = [
    "DE", "LA", "OF", "AND", "THE", "FOR", "IN", "ON", "AT", "TO", "A", "AN",
];

/// Configuration for the department/title heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// A department-shaped token is a title token once its title hits reach
    /// `department hits * title_ratio`
    #[serde(default = "default_title_ratio")]
    pub title_ratio: usize,

    /// Tokens never classified as department codes
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Shortest department code
    #[serde(default = "default_department_min_len")]
    pub department_min_len: usize,

    /// Longest department code
    #[serde(default = "default_department_max_len")]
    pub department_max_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            title_ratio: default_title_ratio(),
            stopwords: default_stopwords(),
            department_min_len: default_department_min_len(),
            department_max_len: default_department_max_len(),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("invalid classifier config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the department shape and ratio are usable
    pub fn validate(&self) -> Result<()> {
        if self.title_ratio == 0 {
            return Err(Error::config("title_ratio must be at least 1"));
        }
        if self.department_min_len == 0 {
            return Err(Error::config("department_min_len must be at least 1"));
        }
        if self.department_min_len > self.department_max_len {
            return Err(Error::config(format!(
                "department_min_len ({}) exceeds department_max_len ({})",
                self.department_min_len, self.department_max_len
            )));
        }
        Ok(())
    }

    /// Whether the uppercase token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.iter().any(|w| w.eq_ignore_ascii_case(token))
    }
}

fn default_title_ratio() -> usize {
    10
}

fn default_stopwords() -> Vec<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

fn default_department_min_len() -> usize {
    2
}

fn default_department_max_len() -> usize {
    5
}

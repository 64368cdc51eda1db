//! Compiled token patterns

use crate::config::ClassifierConfig;
use cidlookup_core::{Error, Result};
use regex::Regex;

/// Matches tokens shaped like a department code, e.g. `ACCT` or `CS`
#[derive(Debug, Clone)]
pub struct DepartmentShape {
    pattern: Regex,
}

impl DepartmentShape {
    /// Build the shape from configured length bounds
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let pattern = Regex::new(&format!(
            "^[A-Z]{{{},{}}}$",
            config.department_min_len, config.department_max_len
        ))
        .map_err(|e| {
            Error::classifier(format!("Failed to compile department pattern: {}", e))
        })?;

        Ok(Self { pattern })
    }

    /// Whether the token consists only of uppercase ASCII letters of a valid length
    pub fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }
}

/// Finds a token at the start of a word, e.g. `BIO` in `C BIOL 1` but not in `MICROBIO`
///
/// Compiled as `\bTOKEN` with the token escaped, so query text is never
/// read as a pattern.
#[derive(Debug, Clone)]
pub struct WordPrefix {
    token: String,
    pattern: Regex,
}

impl WordPrefix {
    /// Compile a matcher for the literal token
    pub fn new(token: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{}", regex::escape(token))).map_err(|e| {
            Error::classifier(format!("Failed to compile pattern for '{}': {}", token, e))
        })?;

        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    /// The token being matched
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the token begins a word anywhere in the haystack
    pub fn is_match(&self, haystack: &str) -> bool {
        !self.token.is_empty() && self.pattern.is_match(haystack)
    }
}

//! Two-stage token classification used by the query resolver

use crate::classifier::{ClassificationResult, Classifier, TokenRole};
use crate::config::ClassifierConfig;
use crate::institution::InstitutionClassifier;
use crate::keyword::KeywordClassifier;
use cidlookup_core::{CourseRecord, Result};
use tracing::debug;

/// Runs the institution stage, then the department/title stage
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    institution: InstitutionClassifier,
    keyword: KeywordClassifier,
}

/// Tokens split by the institution stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstitutionSplit {
    /// Tokens found inside some institution name
    pub institutions: Vec<String>,
    /// Everything else, in query order
    pub remaining: Vec<String>,
}

/// Tokens split by the department/title stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSplit {
    /// Department codes
    pub departments: Vec<String>,
    /// Title fragments
    pub titles: Vec<String>,
}

impl TokenClassifier {
    /// Create both stages from the policy config
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Ok(Self {
            institution: InstitutionClassifier::new(),
            keyword: KeywordClassifier::new(config)?,
        })
    }

    /// Policy values in effect
    pub fn config(&self) -> &ClassifierConfig {
        self.keyword.config()
    }

    /// Classify a single token, institution first
    ///
    /// `dataset` is the full record list; `working` is the set already
    /// narrowed by institution filters.
    pub fn classify(
        &self,
        token: &str,
        dataset: &[&CourseRecord],
        working: &[&CourseRecord],
    ) -> ClassificationResult {
        let result = self.institution.classify(token, dataset);
        if result.role.is_some() {
            return result;
        }
        self.keyword.classify(token, working)
    }

    /// Separate institution tokens from the rest, checking the full dataset
    pub fn split_institutions<S: AsRef<str>>(
        &self,
        tokens: &[S],
        dataset: &[&CourseRecord],
    ) -> InstitutionSplit {
        let mut split = InstitutionSplit::default();
        for token in tokens {
            let token = token.as_ref();
            let result = self.institution.classify(token, dataset);
            if result.is(TokenRole::Institution) {
                split.institutions.push(token.to_string());
            } else {
                split.remaining.push(token.to_string());
            }
        }
        split
    }

    /// Assign each non-institution token to department or title
    ///
    /// Every token lands in exactly one list.
    pub fn split_keywords<S: AsRef<str>>(
        &self,
        tokens: &[S],
        working: &[&CourseRecord],
    ) -> KeywordSplit {
        let mut split = KeywordSplit::default();
        for token in tokens {
            let result = self.keyword.classify(token.as_ref(), working);
            debug!(
                token = %result.token,
                role = ?result.role,
                department_count = result.metadata.department_count,
                title_count = result.metadata.title_count,
                reason = ?result.metadata.reason,
                "Classified keyword"
            );
            match result.role {
                Some(TokenRole::Department) => split.departments.push(result.token),
                _ => split.titles.push(result.token),
            }
        }
        split
    }
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self {
            institution: InstitutionClassifier::new(),
            keyword: KeywordClassifier::default(),
        }
    }
}

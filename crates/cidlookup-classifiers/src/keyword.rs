//! Department-versus-title disambiguation
//!
//! A short all-letter token such as `BIO` or `ART` can be a department code
//! or an ordinary title word. The classifier counts both interpretations in
//! the working set and only calls it a department when title hits stay below
//! `department hits * title_ratio`.

use crate::classifier::{
    ClassificationMetadata, ClassificationReason, ClassificationResult, Classifier, TokenRole,
};
use crate::config::ClassifierConfig;
use crate::patterns::{DepartmentShape, WordPrefix};
use cidlookup_core::{CourseRecord, Result};
use tracing::warn;

/// Assigns every token it sees to either the department or the title role
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    config: ClassifierConfig,
    shape: DepartmentShape,
}

impl KeywordClassifier {
    /// Create a classifier with the given policy values
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let shape = DepartmentShape::new(&config)?;
        Ok(Self { config, shape })
    }

    /// Policy values in effect
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether the token is eligible to be a department code at all
    pub fn is_department_shaped(&self, token: &str) -> bool {
        self.shape.matches(token) && !self.config.is_stopword(token)
    }

    fn decide(
        &self,
        department_count: usize,
        title_count: usize,
    ) -> (TokenRole, ClassificationReason) {
        // Strict `<`: at exactly ratio times the department hits, title wins
        let threshold = department_count.saturating_mul(self.config.title_ratio);
        if department_count > 0 && title_count < threshold {
            (TokenRole::Department, ClassificationReason::DepartmentMajority)
        } else if title_count > 0 {
            (TokenRole::Title, ClassificationReason::TitleMajority)
        } else {
            (TokenRole::Title, ClassificationReason::NoEvidence)
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default()).expect("default classifier config is valid")
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, token: &str, records: &[&CourseRecord]) -> ClassificationResult {
        if !self.is_department_shaped(token) {
            let metadata = ClassificationMetadata {
                reason: ClassificationReason::NotDepartmentShaped,
                ..Default::default()
            };
            return ClassificationResult::claimed(token, TokenRole::Title, metadata);
        }

        let prefix = match WordPrefix::new(token) {
            Ok(prefix) => prefix,
            Err(e) => {
                warn!(token, error = %e, "Treating token as a title");
                let metadata = ClassificationMetadata {
                    reason: ClassificationReason::NotDepartmentShaped,
                    ..Default::default()
                };
                return ClassificationResult::claimed(token, TokenRole::Title, metadata);
            }
        };
        let department_count = records
            .iter()
            .filter(|r| prefix.is_match(r.department_norm()))
            .count();
        let title_count = records
            .iter()
            .filter(|r| r.title_norm().contains(token))
            .count();

        let (role, reason) = self.decide(department_count, title_count);
        let metadata = ClassificationMetadata {
            department_count,
            title_count,
            reason,
        };
        ClassificationResult::claimed(token, role, metadata)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

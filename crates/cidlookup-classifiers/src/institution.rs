//! Institution keyword detection

use crate::classifier::{
    ClassificationMetadata, ClassificationReason, ClassificationResult, Classifier, TokenRole,
};
use cidlookup_core::CourseRecord;

/// Claims tokens that appear inside any institution name
///
/// Runs against the full dataset, ahead of every other classifier.
#[derive(Debug, Clone, Default)]
pub struct InstitutionClassifier;

impl InstitutionClassifier {
    /// Create a new institution classifier
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for InstitutionClassifier {
    fn classify(&self, token: &str, records: &[&CourseRecord]) -> ClassificationResult {
        let hit = records
            .iter()
            .any(|r| r.institution_norm().contains(token));

        if hit {
            let metadata = ClassificationMetadata {
                reason: ClassificationReason::InstitutionMatch,
                ..Default::default()
            };
            ClassificationResult::claimed(token, TokenRole::Institution, metadata)
        } else {
            ClassificationResult::unclaimed(token, ClassificationMetadata::default())
        }
    }

    fn name(&self) -> &str {
        "institution"
    }
}

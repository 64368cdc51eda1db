//! Classifier trait and common types

use cidlookup_core::CourseRecord;
use serde::Serialize;
use std::fmt;

/// Trait for all keyword classifiers
///
/// Classification is a pure function of the token and the records it is
/// counted against; callers pass whichever working set applies.
pub trait Classifier: Send + Sync {
    /// Classify one uppercase token against the given records
    fn classify(&self, token: &str, records: &[&CourseRecord]) -> ClassificationResult;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// The role a search keyword plays in a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    /// Part of an institution name
    Institution,
    /// A department code such as `ACCT`
    Department,
    /// A fragment of a course title
    Title,
}

impl fmt::Display for TokenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Institution => f.write_str("institution"),
            Self::Department => f.write_str("department"),
            Self::Title => f.write_str("title"),
        }
    }
}

/// Result of classifying a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The classified token
    pub token: String,

    /// Assigned role, or `None` when this classifier does not claim the token
    pub role: Option<TokenRole>,

    /// Counts behind the decision
    pub metadata: ClassificationMetadata,
}

impl ClassificationResult {
    /// A result that leaves the token for the next classifier
    pub fn unclaimed(token: &str, metadata: ClassificationMetadata) -> Self {
        Self {
            token: token.to_string(),
            role: None,
            metadata,
        }
    }

    /// A result assigning a role
    pub fn claimed(token: &str, role: TokenRole, metadata: ClassificationMetadata) -> Self {
        Self {
            token: token.to_string(),
            role: Some(role),
            metadata,
        }
    }

    /// Whether the token was classified as the given role
    pub fn is(&self, role: TokenRole) -> bool {
        self.role == Some(role)
    }
}

/// Metadata about a classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationMetadata {
    /// Records whose department field has a word starting with the token
    pub department_count: usize,

    /// Records whose title contains the token
    pub title_count: usize,

    /// Why the role was chosen
    pub reason: ClassificationReason,
}

/// Why a token received its role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassificationReason {
    /// Not decided by this classifier
    #[default]
    NotApplicable,
    /// Some institution name contains the token
    InstitutionMatch,
    /// Department hits outweigh title hits under the ratio
    DepartmentMajority,
    /// Title hits reached the ratio threshold
    TitleMajority,
    /// Not department-shaped, or a stopword
    NotDepartmentShaped,
    /// Department-shaped but found nowhere; kept as a title filter
    NoEvidence,
}

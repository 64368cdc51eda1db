//! cidlookup Classifiers
//!
//! Decides what each search keyword means before any filtering happens.
//!
//! Classification runs in two stages:
//! - Institution stage: a token inside any institution name is an institution
//!   token. Checked against the full dataset.
//! - Keyword stage: everything else is a department code or a title fragment,
//!   decided by counting both interpretations in the institution-filtered
//!   working set.
//!
//! Every token receives a role; none are dropped.

pub mod classifier;
pub mod config;
pub mod institution;
pub mod keyword;
pub mod patterns;
pub mod token;

pub use classifier::{
    ClassificationMetadata, ClassificationReason, ClassificationResult, Classifier, TokenRole,
};
pub use config::{ClassifierConfig, DEFAULT_STOPWORDS};
pub use institution::InstitutionClassifier;
pub use keyword::KeywordClassifier;
pub use patterns::{DepartmentShape, WordPrefix};
pub use token::{InstitutionSplit, KeywordSplit, TokenClassifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier, TokenRole};
    pub use crate::config::ClassifierConfig;
    pub use crate::token::TokenClassifier;
}

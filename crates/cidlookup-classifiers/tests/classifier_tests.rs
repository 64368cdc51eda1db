//! Classifier behaviour on synthetic datasets
//!
//! Covers the ratio tie-break, the stopword list, and using classifiers
//! through the `Classifier` trait object.

use cidlookup_classifiers::{
    ClassificationReason, ClassificationResult, Classifier, ClassifierConfig,
    InstitutionClassifier, KeywordClassifier, TokenClassifier, TokenRole,
};
use cidlookup_core::CourseRecord;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// 1 record where `AR` is a department, 50 where it sits inside a title
fn ambiguous_dataset() -> Vec<CourseRecord> {
    let mut rows = vec![CourseRecord::new(
        "ARTH 100",
        "Drawing",
        "Foothill College",
        "Drawing",
        "AR 1",
    )];
    for i in 0..50 {
        rows.push(CourseRecord::new(
            format!("MATH {}", 100 + i),
            "",
            "Hartnell College",
            format!("Linear Algebra {i}"),
            format!("MATH {}", i + 1),
        ));
    }
    rows
}

/// A classifier that records how often it was asked
struct CountingClassifier {
    inner: KeywordClassifier,
    calls: AtomicU32,
}

impl Classifier for CountingClassifier {
    fn classify(&self, token: &str, records: &[&CourseRecord]) -> ClassificationResult {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.classify(token, records)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_overwhelming_title_hits_beat_department() {
    let rows = ambiguous_dataset();
    let records: Vec<_> = rows.iter().collect();

    let result = KeywordClassifier::default().classify("AR", &records);
    assert_eq!(result.metadata.department_count, 1);
    assert_eq!(result.metadata.title_count, 50);
    assert!(result.is(TokenRole::Title));
}

#[test]
fn test_ratio_boundary_is_strict() {
    let rows = ambiguous_dataset();

    // 1 department hit against 10 and 9 title hits
    let ten: Vec<_> = rows.iter().take(11).collect();
    let nine: Vec<_> = rows.iter().take(10).collect();

    let classifier = KeywordClassifier::default();
    assert!(classifier.classify("AR", &ten).is(TokenRole::Title));
    assert!(classifier.classify("AR", &nine).is(TokenRole::Department));
}

#[test]
fn test_narrowed_working_set_changes_the_outcome() {
    let rows = ambiguous_dataset();
    let all: Vec<_> = rows.iter().collect();
    let foothill: Vec<_> = rows
        .iter()
        .filter(|r| r.institution_norm().contains("FOOTHILL"))
        .collect();

    let classifier = TokenClassifier::default();
    let split = classifier.split_keywords(&["AR"], &all);
    assert_eq!(split.titles, vec!["AR"]);

    let split = classifier.split_keywords(&["AR"], &foothill);
    assert_eq!(split.departments, vec!["AR"]);
}

#[test]
fn test_stopwords_are_configurable() {
    let rows = vec![CourseRecord::new("", "", "Foothill College", "Seminar", "AN 1")];
    let records: Vec<_> = rows.iter().collect();

    let default = KeywordClassifier::default();
    let result = default.classify("AN", &records);
    assert_eq!(result.metadata.reason, ClassificationReason::NotDepartmentShaped);

    let config = ClassifierConfig {
        stopwords: vec![],
        ..Default::default()
    };
    let permissive = KeywordClassifier::new(config).unwrap();
    assert!(permissive.classify("AN", &records).is(TokenRole::Department));
}

#[test]
fn test_classifiers_as_trait_objects() {
    let rows = ambiguous_dataset();
    let records: Vec<_> = rows.iter().collect();

    let counting = Arc::new(CountingClassifier {
        inner: KeywordClassifier::default(),
        calls: AtomicU32::new(0),
    });
    let stages: Vec<Arc<dyn Classifier>> = vec![
        Arc::new(InstitutionClassifier::new()),
        counting.clone(),
    ];

    let mut roles = Vec::new();
    for token in ["HARTNELL", "MATH", "ALGEBRA"] {
        let role = stages
            .iter()
            .find_map(|stage| stage.classify(token, &records).role);
        roles.push(role);
    }

    assert_eq!(
        roles,
        vec![
            Some(TokenRole::Institution),
            Some(TokenRole::Department),
            Some(TokenRole::Title),
        ]
    );
    assert_eq!(counting.calls.load(Ordering::Relaxed), 2);
    assert_eq!(stages[0].name(), "institution");
    assert_eq!(stages[1].name(), "counting");
}

//! Lookup engine: one loaded table plus everything needed to query it

use crate::config::EngineConfig;
use crate::equivalency::{self, CourseEntry, EquivalencyOutcome, HomeCourseIndex};
use crate::query::{QueryResolver, SearchOutcome};
use cidlookup_classifiers::TokenClassifier;
use cidlookup_core::{Dataset, HomeInstitution, Result, ResultSet};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Owns the dataset, the home course index and the classifier
///
/// Everything is built once; queries only read.
pub struct LookupEngine {
    config: EngineConfig,
    dataset: Dataset,
    home: HomeInstitution,
    classifier: TokenClassifier,
    index: HomeCourseIndex,
}

impl LookupEngine {
    /// Build an engine over an already loaded dataset
    pub fn new(dataset: Dataset, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let classifier = TokenClassifier::new(config.classifier.clone())?;
        let home = HomeInstitution::new(config.home_institution.clone());
        let index = HomeCourseIndex::build(&dataset, &home);

        info!(
            rows = dataset.len(),
            home = home.name(),
            home_courses = index.len(),
            "Lookup engine ready"
        );

        Ok(Self {
            config,
            dataset,
            home,
            classifier,
            index,
        })
    }

    /// Load the table from a CSV file and build an engine over it
    pub fn load(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let dataset = Dataset::load(path)?;
        Self::new(dataset, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn home(&self) -> &HomeInstitution {
        &self.home
    }

    pub fn index(&self) -> &HomeCourseIndex {
        &self.index
    }

    /// Resolver borrowing this engine's classifier and home settings
    pub fn resolver(&self) -> QueryResolver<'_> {
        QueryResolver::new(&self.classifier, &self.home, self.config.min_query_chars)
    }

    /// Free-text search
    pub fn search(&self, query: &str) -> ResultSet<'_> {
        self.resolve(query).results
    }

    /// Free-text search with the path taken and classified tokens
    pub fn resolve(&self, query: &str) -> SearchOutcome<'_> {
        let outcome = self.resolver().resolve(&self.dataset, query);

        metrics::counter!("cidlookup_searches_total", "path" => outcome.path.as_str())
            .increment(1);
        metrics::histogram!("cidlookup_search_latency_us").record(outcome.latency_us as f64);

        outcome
    }

    /// Sorted distinct home departments
    pub fn departments(&self) -> Vec<&str> {
        equivalency::departments(&self.index)
    }

    /// Home courses of a department, one per first course number
    pub fn course_listing(&self, department: &str) -> Vec<CourseEntry> {
        equivalency::course_listing(&self.index, department)
    }

    /// Every course equivalent to any home course in the department
    pub fn courses_for_department(&self, department: &str) -> ResultSet<'_> {
        let start = Instant::now();
        let results = equivalency::courses_for_department(&self.index, &self.dataset, department);

        let outcome = if results.is_empty() { "empty" } else { "found" };
        metrics::counter!(
            "cidlookup_selections_total",
            "kind" => "department",
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("cidlookup_selection_latency_us", "kind" => "department")
            .record(start.elapsed().as_micros() as f64);

        results
    }

    /// Every course equivalent to one home course
    pub fn equivalents_for(&self, department: &str, number: &str) -> EquivalencyOutcome<'_> {
        let start = Instant::now();
        let outcome =
            equivalency::equivalents_for(&self.index, &self.dataset, department, number);

        metrics::counter!(
            "cidlookup_selections_total",
            "kind" => "course",
            "outcome" => outcome.as_str()
        )
        .increment(1);
        metrics::histogram!("cidlookup_selection_latency_us", "kind" => "course")
            .record(start.elapsed().as_micros() as f64);

        outcome
    }
}

impl std::fmt::Debug for LookupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupEngine")
            .field("rows", &self.dataset.len())
            .field("home", &self.home.name())
            .field("home_courses", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidlookup_core::CourseRecord;

    fn engine() -> LookupEngine {
        let dataset = Dataset::from_records(vec![
            CourseRecord::new("MATH 210", "Calculus I", "Foothill College", "Calculus", "MATH 1A"),
            CourseRecord::new("MATH 210", "Calculus I", "De Anza College", "Calculus", "MATH 1A"),
            CourseRecord::new("MATH 220", "Calculus II", "De Anza College", "Calculus", "MATH 1B"),
        ]);
        LookupEngine::new(dataset, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_engine_wires_components() {
        let engine = engine();
        assert_eq!(engine.departments(), vec!["MATH"]);
        assert_eq!(engine.course_listing("MATH").len(), 2);
        assert_eq!(engine.search("MATH 210").len(), 2);
        assert_eq!(engine.courses_for_department("MATH").len(), 3);
        assert!(matches!(
            engine.equivalents_for("MATH", "1B"),
            EquivalencyOutcome::Found(_)
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            home_institution: String::new(),
            ..Default::default()
        };
        let err = LookupEngine::new(Dataset::from_records(Vec::new()), config).unwrap_err();
        assert!(err.to_string().contains("home_institution"));
    }

    #[test]
    fn test_load_surfaces_data_format_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = LookupEngine::load(dir.path().join("cid.csv"), EngineConfig::default())
            .unwrap_err();
        assert!(err.is_data_format());
    }
}

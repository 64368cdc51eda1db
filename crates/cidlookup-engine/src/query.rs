//! Free-text query resolution
//!
//! A query takes one of two paths:
//! - Direct C-ID: `ACCT 110`, `acct-110`, `BIOL 110B hartnell` are looked up
//!   in the equivalency identifiers, with trailing words narrowing by
//!   institution or title.
//! - Keywords: every word is classified as institution, department, or title
//!   and applied as an AND filter. Without an institution word the matches are
//!   widened to every school sharing their equivalency identifiers.
//!
//! Both paths deduplicate and put home-institution rows first.

use crate::cid::CidQuery;
use crate::filter::{Filter, FilterChain};
use cidlookup_classifiers::TokenClassifier;
use cidlookup_core::{CourseRecord, Dataset, HomeInstitution, ResultSet};
use std::time::Instant;
use tracing::{debug, warn};

/// Which path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPath {
    /// Query was shorter than the minimum length
    TooShort,
    /// Matched equivalency identifiers directly
    CidDirect,
    /// Classified keywords
    Keywords,
}

impl SearchPath {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::CidDirect => "cid",
            Self::Keywords => "keywords",
        }
    }
}

/// A search result together with how it was reached
#[derive(Debug, Clone)]
pub struct SearchOutcome<'d> {
    /// Ordered, deduplicated rows
    pub results: ResultSet<'d>,

    /// Path taken
    pub path: SearchPath,

    /// Tokens treated as institution names
    pub institutions: Vec<String>,

    /// Tokens treated as department codes
    pub departments: Vec<String>,

    /// Tokens treated as title fragments (or trailing words of a C-ID query)
    pub titles: Vec<String>,

    /// Whether results were widened to all schools sharing the matched identifiers
    pub expanded: bool,

    /// Time spent resolving
    pub latency_us: u64,
}

impl<'d> SearchOutcome<'d> {
    fn new(path: SearchPath) -> Self {
        Self {
            results: ResultSet::empty(),
            path,
            institutions: Vec::new(),
            departments: Vec::new(),
            titles: Vec::new(),
            expanded: false,
            latency_us: 0,
        }
    }
}

/// Resolves free-text queries against a dataset
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    classifier: &'a TokenClassifier,
    home: &'a HomeInstitution,
    min_query_chars: usize,
}

impl<'a> QueryResolver<'a> {
    /// Create a resolver over shared classifier and home settings
    pub fn new(
        classifier: &'a TokenClassifier,
        home: &'a HomeInstitution,
        min_query_chars: usize,
    ) -> Self {
        Self {
            classifier,
            home,
            min_query_chars,
        }
    }

    /// Resolve a query to ordered rows
    pub fn search<'d>(&self, dataset: &'d Dataset, query: &str) -> ResultSet<'d> {
        self.resolve(dataset, query).results
    }

    /// Resolve a query and report how the result was reached
    pub fn resolve<'d>(&self, dataset: &'d Dataset, query: &str) -> SearchOutcome<'d> {
        let start = Instant::now();
        let trimmed = query.trim();

        let mut outcome = if trimmed.chars().count() < self.min_query_chars {
            SearchOutcome::new(SearchPath::TooShort)
        } else {
            let upper = trimmed.to_uppercase();
            let all: Vec<&'d CourseRecord> = dataset.iter().collect();

            match self.cid_direct(&all, &upper) {
                Some(outcome) => outcome,
                None => self.keywords(&all, &upper),
            }
        };

        outcome.latency_us = start.elapsed().as_micros() as u64;
        debug!(
            query = trimmed,
            path = outcome.path.as_str(),
            rows = outcome.results.len(),
            expanded = outcome.expanded,
            latency_us = outcome.latency_us,
            "Resolved query"
        );
        outcome
    }

    /// Direct identifier lookup; `None` falls through to keyword search
    fn cid_direct<'d>(&self, all: &[&'d CourseRecord], upper: &str) -> Option<SearchOutcome<'d>> {
        let cid = CidQuery::parse(upper)?;

        let direct = FilterChain::new()
            .with(Filter::equivalency_contains(cid.code()))
            .apply(all);
        if direct.is_empty() {
            debug!(code = %cid.code(), "No direct C-ID match, falling back to keywords");
            return None;
        }

        let mut chain = FilterChain::new();
        chain.extend(cid.extras.iter().map(|w| Filter::institution_or_title(w)));
        let rows = chain.apply(&direct);

        let mut outcome = SearchOutcome::new(SearchPath::CidDirect);
        outcome.titles = cid.extras;
        outcome.results = ResultSet::new(rows).dedup().partition_home(self.home);
        Some(outcome)
    }

    fn keywords<'d>(&self, all: &[&'d CourseRecord], upper: &str) -> SearchOutcome<'d> {
        let tokens: Vec<&str> = upper.split_whitespace().collect();
        let mut outcome = SearchOutcome::new(SearchPath::Keywords);

        // Institution names are judged against the whole table
        let split = self.classifier.split_institutions(tokens.as_slice(), all);
        let mut chain = FilterChain::new();
        chain.extend(split.institutions.iter().map(|t| Filter::institution(t.as_str())));
        let working = chain.apply(all);

        // Department versus title is judged against what the institutions left
        let keywords = self
            .classifier
            .split_keywords(split.remaining.as_slice(), &working);
        let mut chain = FilterChain::new();
        for token in &keywords.departments {
            match Filter::department(token) {
                Ok(filter) => chain.push(filter),
                Err(e) => {
                    warn!(token = %token, error = %e, "Filtering department token as a title");
                    chain.push(Filter::title(token.as_str()));
                }
            }
        }
        chain.extend(keywords.titles.iter().map(|t| Filter::title(t.as_str())));
        let filtered = chain.apply(&working);

        outcome.institutions = split.institutions;
        outcome.departments = keywords.departments;
        outcome.titles = keywords.titles;

        if filtered.is_empty() {
            return outcome;
        }

        let mut rows = filtered;
        if outcome.institutions.is_empty() {
            let matched = ResultSet::new(rows);
            let ids = matched.equivalency_ids();
            rows = matched.into_rows();

            if ids.iter().all(|id| !id.is_empty()) {
                rows = FilterChain::new()
                    .with(Filter::equivalency_in(ids))
                    .apply(all);
                outcome.expanded = true;
            }
        }

        outcome.results = ResultSet::new(rows).dedup().partition_home(self.home);
        outcome
    }
}

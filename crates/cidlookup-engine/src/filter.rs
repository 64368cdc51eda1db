//! Record filters built from classified query tokens

use cidlookup_classifiers::WordPrefix;
use cidlookup_core::{CourseRecord, Result};
use std::collections::HashSet;

/// A predicate over one record's normalized fields
#[derive(Debug, Clone)]
pub enum Filter {
    /// Institution contains the needle
    Institution {
        /// Uppercase substring
        needle: String,
    },

    /// Some word of the department field starts with the token
    Department {
        /// Word-start matcher for the department code
        prefix: WordPrefix,
    },

    /// Title contains the needle
    Title {
        /// Uppercase substring
        needle: String,
    },

    /// Equivalency identifier contains the needle, e.g. `ACCT 110`
    EquivalencyContains {
        /// Uppercase substring
        needle: String,
    },

    /// Equivalency identifier is one of a set
    EquivalencyIn {
        /// Exact identifiers as stored in the table
        ids: HashSet<String>,
    },

    /// Composite filter (AND/OR logic)
    Composite {
        /// Logic operator
        operator: CompositeOperator,

        /// Sub-filters
        filters: Vec<Filter>,
    },
}

/// Operator for composite filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOperator {
    And,
    Or,
}

impl Filter {
    /// Institution substring filter
    pub fn institution(needle: impl Into<String>) -> Self {
        Self::Institution {
            needle: needle.into(),
        }
    }

    /// Department word-start filter
    pub fn department(token: &str) -> Result<Self> {
        Ok(Self::Department {
            prefix: WordPrefix::new(token)?,
        })
    }

    /// Title substring filter
    pub fn title(needle: impl Into<String>) -> Self {
        Self::Title {
            needle: needle.into(),
        }
    }

    /// Institution-or-title filter used for trailing words of a C-ID query
    pub fn institution_or_title(needle: &str) -> Self {
        Self::Composite {
            operator: CompositeOperator::Or,
            filters: vec![Self::institution(needle), Self::title(needle)],
        }
    }

    /// Equivalency identifier substring filter
    pub fn equivalency_contains(needle: impl Into<String>) -> Self {
        Self::EquivalencyContains {
            needle: needle.into(),
        }
    }

    /// Equivalency identifier membership filter
    pub fn equivalency_in<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::EquivalencyIn {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the record passes this filter
    pub fn matches(&self, record: &CourseRecord) -> bool {
        match self {
            Self::Institution { needle } => record.institution_norm().contains(needle.as_str()),
            Self::Department { prefix } => prefix.is_match(record.department_norm()),
            Self::Title { needle } => record.title_norm().contains(needle.as_str()),
            Self::EquivalencyContains { needle } => {
                record.equivalency_id_norm().contains(needle.as_str())
            }
            Self::EquivalencyIn { ids } => ids.contains(&record.equivalency_id),
            Self::Composite { operator, filters } => match operator {
                CompositeOperator::And => filters.iter().all(|f| f.matches(record)),
                CompositeOperator::Or => filters.iter().any(|f| f.matches(record)),
            },
        }
    }
}

/// Filters applied one after another, each narrowing the previous output
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Append a filter, builder style
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Keep the records that pass every filter, in their original order
    ///
    /// Stops early once nothing is left.
    pub fn apply<'a>(&self, records: &[&'a CourseRecord]) -> Vec<&'a CourseRecord> {
        let mut current = records.to_vec();
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            current.retain(|r| filter.matches(r));
        }
        current
    }
}

impl Extend<Filter> for FilterChain {
    fn extend<I: IntoIterator<Item = Filter>>(&mut self, iter: I) {
        self.filters.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<CourseRecord> {
        vec![
            CourseRecord::new("ACCT 110", "", "De Anza College", "Financial Accounting", "ACCT 1A"),
            CourseRecord::new(
                "ACCT 120",
                "",
                "Foothill College",
                "Managerial Accounting",
                "ACTG 1B",
            ),
            CourseRecord::new("BIOL 110B", "", "Hartnell College", "Human Anatomy", "BIO 5"),
        ]
    }

    #[test]
    fn test_single_filters() {
        let rows = rows();

        assert!(Filter::institution("ANZA").matches(&rows[0]));
        assert!(!Filter::institution("ANZA").matches(&rows[1]));
        assert!(Filter::department("ACT").unwrap().matches(&rows[1]));
        assert!(!Filter::department("CTG").unwrap().matches(&rows[1]));
        assert!(Filter::title("ANATOMY").matches(&rows[2]));
        assert!(Filter::equivalency_contains("ACCT 1").matches(&rows[1]));
        assert!(Filter::equivalency_in(["BIOL 110B"]).matches(&rows[2]));
        assert!(!Filter::equivalency_in(["BIOL 110"]).matches(&rows[2]));
    }

    #[test]
    fn test_institution_or_title() {
        let rows = rows();
        let filter = Filter::institution_or_title("FOOTHILL");
        assert!(filter.matches(&rows[1]));

        let filter = Filter::institution_or_title("FINANCIAL");
        assert!(filter.matches(&rows[0]));
        assert!(!filter.matches(&rows[1]));
    }

    #[test]
    fn test_composite_and() {
        let rows = rows();
        let filter = Filter::Composite {
            operator: CompositeOperator::And,
            filters: vec![Filter::title("ACCOUNTING"), Filter::institution("FOOTHILL")],
        };

        assert!(!filter.matches(&rows[0]));
        assert!(filter.matches(&rows[1]));
    }

    #[test]
    fn test_chain_narrows_in_order() {
        let rows = rows();
        let records: Vec<_> = rows.iter().collect();

        let chain = FilterChain::new()
            .with(Filter::title("ACCOUNTING"))
            .with(Filter::institution("COLLEGE"));
        let kept = chain.apply(&records);
        assert_eq!(kept.len(), 2);
        assert!(std::ptr::eq(kept[0], &rows[0]));
        assert!(std::ptr::eq(kept[1], &rows[1]));

        let chain = chain.with(Filter::institution("HARTNELL"));
        assert!(chain.apply(&records).is_empty());
    }

    #[test]
    fn test_empty_chain_keeps_everything() {
        let rows = rows();
        let records: Vec<_> = rows.iter().collect();
        assert_eq!(FilterChain::new().apply(&records).len(), 3);
    }
}

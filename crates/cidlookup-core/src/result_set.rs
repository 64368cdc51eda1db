//! Ordered result sets produced by searches and selections

use crate::types::{CourseRecord, HomeInstitution};
use serde::Serialize;
use std::collections::HashSet;

/// An ordered sequence of records borrowed from a [`Dataset`](crate::Dataset)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet<'a> {
    rows: Vec<&'a CourseRecord>,
}

impl<'a> ResultSet<'a> {
    /// Wrap rows in their current order
    pub fn new(rows: Vec<&'a CourseRecord>) -> Self {
        Self { rows }
    }

    /// An empty result set
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Rows in order
    pub fn rows(&self) -> &[&'a CourseRecord] {
        &self.rows
    }

    /// Iterate over rows in order
    pub fn iter(&self) -> impl Iterator<Item = &'a CourseRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume into the underlying rows
    pub fn into_rows(self) -> Vec<&'a CourseRecord> {
        self.rows
    }

    /// Drop rows identical to an earlier row across the five source fields
    pub fn dedup(self) -> Self {
        let mut seen = HashSet::with_capacity(self.rows.len());
        let rows = self
            .rows
            .into_iter()
            .filter(|&r| seen.insert(r.row_key()))
            .collect();
        Self { rows }
    }

    /// Move home-institution rows to the front, keeping order within each group
    pub fn partition_home(self, home: &HomeInstitution) -> Self {
        let (mut rows, others): (Vec<_>, Vec<_>) =
            self.rows.into_iter().partition(|r| home.matches(r));
        rows.extend(others);
        Self { rows }
    }

    /// Whether every home row precedes every other row
    pub fn is_home_first(&self, home: &HomeInstitution) -> bool {
        let first_other = self.rows.iter().position(|r| !home.matches(r));
        match first_other {
            Some(i) => self.rows[i..].iter().all(|r| !home.matches(r)),
            None => true,
        }
    }

    /// Distinct equivalency identifiers in first-seen order
    pub fn equivalency_ids(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .copied()
            .map(|r| r.equivalency_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Copy the first `limit` rows into a new set
    pub fn truncated(&self, limit: usize) -> Self {
        Self {
            rows: self.rows.iter().take(limit).copied().collect(),
        }
    }
}

impl<'a> FromIterator<&'a CourseRecord> for ResultSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a CourseRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for ResultSet<'a> {
    type Item = &'a CourseRecord;
    type IntoIter = std::vec::IntoIter<&'a CourseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

//! Browsing home-institution courses and their equivalents elsewhere

use crate::filter::{Filter, FilterChain};
use crate::natural::NaturalKey;
use cidlookup_core::{CourseRecord, Dataset, HomeInstitution, ResultSet};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// A home course with its code split for browsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeCourse {
    /// Department, e.g. `ACCT` or `C D`
    pub department: String,

    /// Full course number, e.g. `6A + BIOL 6C`
    pub number: String,

    /// Number before any `+`, e.g. `6A`
    pub first_number: String,

    /// Local title
    pub title: String,

    /// Equivalency identifier, never empty
    pub equivalency_id: String,
}

/// Home courses that carry an equivalency identifier
///
/// Built once from a dataset. Records whose code does not split into a
/// department and a number are left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeCourseIndex {
    home: HomeInstitution,
    courses: Vec<HomeCourse>,
}

impl HomeCourseIndex {
    /// Index the home institution's courses in dataset order
    pub fn build(dataset: &Dataset, home: &HomeInstitution) -> Self {
        let mut skipped = 0usize;
        let courses: Vec<HomeCourse> = dataset
            .iter()
            .filter(|r| home.matches(r) && r.has_equivalency())
            .filter_map(|r| {
                let code = r.split_code();
                if !code.is_complete() {
                    skipped += 1;
                    return None;
                }
                Some(HomeCourse {
                    first_number: code.first_number().to_string(),
                    department: normalize_department(&code.department),
                    number: code.number,
                    title: r.local_title.clone(),
                    equivalency_id: r.equivalency_id.clone(),
                })
            })
            .collect();

        let index = Self {
            home: home.clone(),
            courses,
        };
        info!(
            home = home.name(),
            courses = index.len(),
            departments = index.departments().len(),
            skipped,
            "Built home course index"
        );
        index
    }

    /// Institution the index was built for
    pub fn home(&self) -> &HomeInstitution {
        &self.home
    }

    /// Indexed courses in dataset order
    pub fn courses(&self) -> &[HomeCourse] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Sorted distinct departments
    pub fn departments(&self) -> Vec<&str> {
        self.courses
            .iter()
            .map(|c| c.department.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Courses of one department in dataset order
    pub fn courses_in<'s>(&'s self, department: &str) -> impl Iterator<Item = &'s HomeCourse> + 's {
        let department = normalize_department(department);
        self.courses
            .iter()
            .filter(move |c| c.department == department)
    }
}

/// Result of looking up the equivalents of one home course
#[derive(Debug, Clone, PartialEq)]
pub enum EquivalencyOutcome<'d> {
    /// Every record sharing the course's identifiers, home rows first
    Found(ResultSet<'d>),

    /// No home course has that department and number
    CourseNotFound,

    /// The course exists but belongs to no equivalency group
    NoEquivalency,
}

impl<'d> EquivalencyOutcome<'d> {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::CourseNotFound => "course_not_found",
            Self::NoEquivalency => "no_equivalency",
        }
    }

    /// Rows when found
    pub fn results(&self) -> Option<&ResultSet<'d>> {
        match self {
            Self::Found(results) => Some(results),
            _ => None,
        }
    }
}

/// All home courses of a department, widened to every school sharing their identifiers
pub fn courses_for_department<'d>(
    index: &HomeCourseIndex,
    dataset: &'d Dataset,
    department: &str,
) -> ResultSet<'d> {
    let ids: Vec<&str> = index
        .courses_in(department)
        .map(|c| c.equivalency_id.as_str())
        .collect();
    debug!(department, ids = ids.len(), "Selecting department");

    if ids.is_empty() {
        return ResultSet::empty();
    }
    expand(dataset, ids, index.home())
}

/// Every record equivalent to one home course
///
/// `number` matches a course whose full number equals it or continues with
/// a space or `+`, so `6A` finds `6A + BIOL 6C` but not `6AH`.
pub fn equivalents_for<'d>(
    index: &HomeCourseIndex,
    dataset: &'d Dataset,
    department: &str,
    number: &str,
) -> EquivalencyOutcome<'d> {
    let number = number.trim().to_uppercase();
    let spaced = format!("{} ", number);
    let joined = format!("{}+", number);

    let matched: Vec<&HomeCourse> = index
        .courses_in(department)
        .filter(|c| {
            let n = c.number.to_uppercase();
            n == number || n.starts_with(&spaced) || n.starts_with(&joined)
        })
        .collect();

    if matched.is_empty() {
        debug!(department, number = %number, "Home course not found");
        return EquivalencyOutcome::CourseNotFound;
    }

    let mut ids: Vec<&str> = Vec::new();
    for course in &matched {
        let id = course.equivalency_id.as_str();
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return EquivalencyOutcome::NoEquivalency;
    }

    let results = expand(dataset, ids, index.home());
    if results.is_empty() {
        return EquivalencyOutcome::NoEquivalency;
    }
    EquivalencyOutcome::Found(results)
}

/// One line of a department's course listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEntry {
    /// Number before any `+`; listing key
    pub first_number: String,

    /// Full number of the first course seen with this key
    pub number: String,

    /// Title of the first course seen with this key
    pub title: String,

    /// Identifier of the first course seen with this key
    pub equivalency_id: String,
}

impl CourseEntry {
    /// `6A (ACCT 110) :: Financial Accounting` with the title cut to `title_len` chars
    pub fn display(&self, title_len: usize) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            return format!("{} ({})", self.first_number, self.equivalency_id);
        }

        let short = if title.chars().count() > title_len {
            let cut: String = title.chars().take(title_len).collect();
            format!("{}...", cut)
        } else {
            title.to_string()
        };
        format!("{} ({}) :: {}", self.first_number, self.equivalency_id, short)
    }
}

/// One entry per first course number of a department, in natural order
pub fn course_listing(index: &HomeCourseIndex, department: &str) -> Vec<CourseEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries: Vec<CourseEntry> = Vec::new();

    for course in index.courses_in(department) {
        if course.first_number.is_empty() || !seen.insert(course.first_number.as_str()) {
            continue;
        }
        entries.push(CourseEntry {
            first_number: course.first_number.clone(),
            number: course.number.clone(),
            title: course.title.clone(),
            equivalency_id: course.equivalency_id.clone(),
        });
    }

    entries.sort_by_cached_key(|e| NaturalKey::new(&e.first_number));
    entries
}

/// Sorted distinct home departments
pub fn departments(index: &HomeCourseIndex) -> Vec<&str> {
    index.departments()
}

fn expand<'d>(dataset: &'d Dataset, ids: Vec<&str>, home: &HomeInstitution) -> ResultSet<'d> {
    let all: Vec<&'d CourseRecord> = dataset.iter().collect();
    let rows = FilterChain::new()
        .with(Filter::equivalency_in(ids))
        .apply(&all);

    ResultSet::new(rows).dedup().partition_home(home)
}

fn normalize_department(department: &str) -> String {
    department
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, school: &str, title: &str, code: &str) -> CourseRecord {
        CourseRecord::new(id, "", school, title, code)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("ACCT 110", "Foothill College", "Financial Accounting", "ACTG 1A"),
            record("ACCT 110", "De Anza College", "Financial Accounting I", "ACCT 1A"),
            record("ACCT 120", "De Anza College", "Managerial Accounting", "ACCT 1B"),
            record("ACCT 120", "Hartnell College", "Managerial Accounting", "ACC 2"),
            record("BIOL 190", "De Anza College", "Organismal Biology", "BIOL 6A + BIOL 6C"),
            record("BIOL 190", "Foothill College", "Principles of Biology", "BIOL 1A"),
            record("BIOL 135", "De Anza College", "Honors Biology", "BIOL 6AH"),
            record("", "De Anza College", "Field Biology", "BIOL 10"),
            record("COMP 122", "De Anza College", "Programming", "CIS"),
            record(
                "CDEV 100",
                "De Anza College",
                "Child Growth and Development Through the Lifespan",
                "C  D 10",
            ),
            record("BIOL 110B", "De Anza College", "Human Anatomy", "BIOL 40A"),
            record("BIOL 110B", "De Anza College", "Human Anatomy", "BIOL 40A"),
        ])
    }

    fn index(data: &Dataset) -> HomeCourseIndex {
        HomeCourseIndex::build(data, &HomeInstitution::new("De Anza College"))
    }

    fn codes(results: &ResultSet<'_>) -> Vec<String> {
        results
            .iter()
            .map(|r| format!("{} | {}", r.institution, r.local_course_code))
            .collect()
    }

    #[test]
    fn test_index_keeps_home_courses_with_ids() {
        let data = dataset();
        let index = index(&data);

        assert_eq!(index.len(), 7);
        assert!(index.courses().iter().all(|c| !c.equivalency_id.is_empty()));
        assert_eq!(index.departments(), vec!["ACCT", "BIOL", "C D"]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let data = dataset();
        assert_eq!(index(&data), index(&data));
    }

    #[test]
    fn test_composite_number_is_split() {
        let data = dataset();
        let index = index(&data);
        let course = index
            .courses_in("biol")
            .find(|c| c.number.contains('+'))
            .unwrap();

        assert_eq!(course.number, "6A + BIOL 6C");
        assert_eq!(course.first_number, "6A");
    }

    #[test]
    fn test_courses_for_department_expands_home_first() {
        let data = dataset();
        let index = index(&data);
        let results = courses_for_department(&index, &data, "ACCT");

        assert_eq!(
            codes(&results),
            vec![
                "De Anza College | ACCT 1A",
                "De Anza College | ACCT 1B",
                "Foothill College | ACTG 1A",
                "Hartnell College | ACC 2",
            ]
        );
    }

    #[test]
    fn test_unknown_department_is_empty() {
        let data = dataset();
        assert!(courses_for_department(&index(&data), &data, "MATH").is_empty());
    }

    #[test]
    fn test_equivalents_for_composite_number() {
        let data = dataset();
        let outcome = equivalents_for(&index(&data), &data, "BIOL", "6A");

        let results = outcome.results().unwrap();
        assert_eq!(
            codes(results),
            vec![
                "De Anza College | BIOL 6A + BIOL 6C",
                "Foothill College | BIOL 1A",
            ]
        );
    }

    #[test]
    fn test_equivalents_are_deduplicated() {
        let data = dataset();
        let outcome = equivalents_for(&index(&data), &data, "BIOL", "40A");
        assert_eq!(outcome.results().map(ResultSet::len), Some(1));
    }

    #[test]
    fn test_equivalents_not_found() {
        let data = dataset();
        let index = index(&data);

        assert_eq!(
            equivalents_for(&index, &data, "BIOL", "99"),
            EquivalencyOutcome::CourseNotFound
        );
        assert_eq!(
            equivalents_for(&index, &data, "MATH", "1A"),
            EquivalencyOutcome::CourseNotFound
        );
        assert_eq!(
            equivalents_for(&index, &data, "BIOL", "6").as_str(),
            "course_not_found"
        );
    }

    #[test]
    fn test_identifiers_missing_from_dataset() {
        let data = dataset();
        let index = index(&data);
        let other = Dataset::from_records(vec![record("X 1", "Hartnell College", "", "X 1")]);

        assert_eq!(
            equivalents_for(&index, &other, "ACCT", "1A"),
            EquivalencyOutcome::NoEquivalency
        );
    }

    #[test]
    fn test_course_listing_natural_order() {
        let data = dataset();
        let index = index(&data);
        let listing = course_listing(&index, "BIOL");

        let numbers: Vec<&str> = listing.iter().map(|e| e.first_number.as_str()).collect();
        assert_eq!(numbers, vec!["6A", "6AH", "40A"]);
        assert_eq!(listing[0].number, "6A + BIOL 6C");
    }

    #[test]
    fn test_course_entry_display() {
        let data = dataset();
        let index = index(&data);

        let listing = course_listing(&index, "C D");
        assert_eq!(
            listing[0].display(40),
            "10 (CDEV 100) :: Child Growth and Development Through the..."
        );

        let listing = course_listing(&index, "acct");
        assert_eq!(listing[0].display(40), "1A (ACCT 110) :: Financial Accounting I");

        let entry = CourseEntry {
            first_number: "2".to_string(),
            number: "2".to_string(),
            title: " ".to_string(),
            equivalency_id: "E1".to_string(),
        };
        assert_eq!(entry.display(40), "2 (E1)");
    }
}

//! Core types for cidlookup

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// CSV column holding the equivalency identifier
pub const COL_EQUIVALENCY_ID: &str = "C-ID #";

/// CSV column holding the equivalency descriptor
pub const COL_EQUIVALENCY_LABEL: &str = "C-ID Descriptor";

/// CSV column holding the offering institution
pub const COL_INSTITUTION: &str = "Institution";

/// CSV column holding the local course title
pub const COL_LOCAL_TITLE: &str = "Local Course Title(s)";

/// CSV column holding the local department and number
pub const COL_LOCAL_CODE: &str = "Local Dept. Name & Number";

/// Columns every input table must carry, in display order
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_EQUIVALENCY_ID,
    COL_EQUIVALENCY_LABEL,
    COL_INSTITUTION,
    COL_LOCAL_TITLE,
    COL_LOCAL_CODE,
];

/// One row of the equivalency table
///
/// The five source fields are kept verbatim for display. The uppercased
/// copies used for matching (institution, department, title, and the
/// identifier for direct C-ID lookups) are computed once in
/// [`CourseRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    /// Identifier shared by all mutual equivalents (empty when ungrouped)
    pub equivalency_id: String,

    /// Human-readable descriptor of the equivalency group
    pub equivalency_label: String,

    /// Offering school
    pub institution: String,

    /// Course title at the offering school
    pub local_title: String,

    /// Raw "department + number" field, e.g. `ACCT 1A` or `C D 1`
    pub local_course_code: String,

    #[serde(skip)]
    normalized: NormalizedFields,
}

/// Uppercased matching keys derived from a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NormalizedFields {
    equivalency_id: String,
    institution: String,
    department: String,
    title: String,
}

impl CourseRecord {
    /// Create a record and compute its normalized fields
    pub fn new(
        equivalency_id: impl Into<String>,
        equivalency_label: impl Into<String>,
        institution: impl Into<String>,
        local_title: impl Into<String>,
        local_course_code: impl Into<String>,
    ) -> Self {
        let equivalency_id = equivalency_id.into();
        let equivalency_label = equivalency_label.into();
        let institution = institution.into();
        let local_title = local_title.into();
        let local_course_code = local_course_code.into();

        let normalized = NormalizedFields {
            equivalency_id: equivalency_id.to_uppercase(),
            institution: institution.to_uppercase(),
            department: collapse_whitespace(&local_course_code.to_uppercase()),
            title: local_title.to_uppercase(),
        };

        Self {
            equivalency_id,
            equivalency_label,
            institution,
            local_title,
            local_course_code,
            normalized,
        }
    }

    /// Uppercased equivalency identifier
    pub fn equivalency_id_norm(&self) -> &str {
        &self.normalized.equivalency_id
    }

    /// Uppercased institution
    pub fn institution_norm(&self) -> &str {
        &self.normalized.institution
    }

    /// Uppercased department field with whitespace runs collapsed
    pub fn department_norm(&self) -> &str {
        &self.normalized.department
    }

    /// Uppercased title
    pub fn title_norm(&self) -> &str {
        &self.normalized.title
    }

    /// Whether the record carries an equivalency identifier
    pub fn has_equivalency(&self) -> bool {
        !self.equivalency_id.is_empty()
    }

    /// The five source fields, used as the identity of a row for deduplication
    pub fn row_key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.equivalency_id,
            &self.equivalency_label,
            &self.institution,
            &self.local_title,
            &self.local_course_code,
        )
    }

    /// Split the local code into department and number for display
    pub fn split_code(&self) -> CourseCode {
        CourseCode::parse(&self.local_course_code)
    }
}

/// A local code split into department and course number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCode {
    /// Department, e.g. `ACCT` or `C D`
    pub department: String,

    /// Course number, possibly composite, e.g. `6A + BIOL 6C`
    pub number: String,
}

impl CourseCode {
    /// Parse `ACCT 1A` into (`ACCT`, `1A`) and `C D 1` into (`C D`, `1`)
    ///
    /// When the code has no letters-then-digits shape the department is empty
    /// and the whole code is kept as the number.
    pub fn parse(code: &str) -> Self {
        if code.is_empty() {
            return Self {
                department: String::new(),
                number: String::new(),
            };
        }

        match code_regex().captures(code.trim()) {
            Some(caps) => Self {
                department: caps[1].trim().to_string(),
                number: caps[2].trim().to_string(),
            },
            None => Self {
                department: String::new(),
                number: code.trim().to_string(),
            },
        }
    }

    /// Whether both halves were recognised
    pub fn is_complete(&self) -> bool {
        !self.department.is_empty() && !self.number.is_empty()
    }

    /// Course number before any `+`, e.g. `6A` for `6A + BIOL 6C`
    pub fn first_number(&self) -> &str {
        first_course_number(&self.number)
    }
}

/// Course number before any `+`, trimmed
pub fn first_course_number(number: &str) -> &str {
    number.split('+').next().unwrap_or_default().trim()
}

/// The institution whose rows lead every result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeInstitution {
    name: String,
    upper: String,
}

impl HomeInstitution {
    /// Create a home institution matcher from its display name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let upper = name.trim().to_uppercase();
        Self { name, upper }
    }

    /// Display name as configured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the record's institution contains the home name, ignoring case
    pub fn matches(&self, record: &CourseRecord) -> bool {
        !self.upper.is_empty() && record.institution_norm().contains(&self.upper)
    }
}

fn code_regex() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| {
        Regex::new(r"^([A-Z\s]+?)\s+([0-9].*)$").expect("course code pattern is valid")
    })
}

/// Replace every run of whitespace with a single space
fn collapse_whitespace(s: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    SPACES
        .get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
        .replace_all(s, " ")
        .into_owned()
}

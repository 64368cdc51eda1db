//! Recognising queries that name a C-ID directly, e.g. `ACCT 110` or `acct-110 foothill`

use regex::Regex;
use std::sync::OnceLock;

/// A query shaped like `<DEPT><sep><NUMBER>[ extra words]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidQuery {
    /// Letter group, e.g. `ACCT`
    pub department: String,

    /// Digits with an optional trailing letter, e.g. `110` or `110B`
    pub number: String,

    /// Words after the number, used as institution-or-title filters
    pub extras: Vec<String>,
}

impl CidQuery {
    /// Parse an uppercased query
    pub fn parse(upper_query: &str) -> Option<Self> {
        let caps = cid_regex().captures(upper_query)?;
        Some(Self {
            department: caps[1].to_string(),
            number: caps[2].to_string(),
            extras: caps[3].split_whitespace().map(str::to_string).collect(),
        })
    }

    /// The `DEPT NUMBER` text searched for inside equivalency identifiers
    pub fn code(&self) -> String {
        format!("{} {}", self.department, self.number)
    }
}

fn cid_regex() -> &'static Regex {
    static CID: OnceLock<Regex> = OnceLock::new();
    CID.get_or_init(|| {
        Regex::new(r"^([A-Z]{2,5})[\s-]+(\d+[A-Z]?)\s*(.*)$").expect("C-ID pattern is valid")
    })
}

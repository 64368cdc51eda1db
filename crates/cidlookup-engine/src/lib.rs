//! cidlookup query engine
//!
//! Resolves free-text queries and course selections against a loaded C-ID
//! table:
//! - Direct C-ID lookups (`ACCT 110`, `acct-110 foothill`)
//! - Keyword search with institution, department and title classification
//! - Expansion to every school sharing an equivalency identifier
//! - Browsing the home institution's departments and courses

pub mod cid;
pub mod config;
pub mod engine;
pub mod equivalency;
pub mod filter;
pub mod natural;
pub mod query;

pub use cid::CidQuery;
pub use config::EngineConfig;
pub use engine::LookupEngine;
pub use equivalency::{
    course_listing, courses_for_department, departments, equivalents_for, CourseEntry,
    EquivalencyOutcome, HomeCourse, HomeCourseIndex,
};
pub use filter::{CompositeOperator, Filter, FilterChain};
pub use natural::{sort_course_numbers, NaturalKey};
pub use query::{QueryResolver, SearchOutcome, SearchPath};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::LookupEngine;
    pub use crate::equivalency::{CourseEntry, EquivalencyOutcome};
    pub use crate::query::{SearchOutcome, SearchPath};
}

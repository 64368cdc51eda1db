//! Text and JSON rendering of lookup results

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use cidlookup_core::{CourseRecord, HomeInstitution, ResultSet};
use cidlookup_engine::{CourseEntry, EquivalencyOutcome, SearchOutcome};
use serde::Serialize;
use std::io::{self, Write};

pub const NO_COURSES: &str = "No courses found";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const NO_EQUIVALENCY: &str = "No CID found for this course";

const HEADERS: [&str; 5] = ["C-ID", "School", "Dept", "Number", "Title"];
const HOME_MARK: &str = "*";

/// `Found 3 C-ID(s), 120 course(s)` with a truncation note past `max`
pub fn summary(ids: usize, rows: usize, max: usize) -> String {
    let mut line = format!("Found {} C-ID(s), {} course(s)", ids, rows);
    if rows > max {
        line.push_str(&format!(" - Showing first {}", max));
    }
    line
}

/// One displayed result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub cid: String,
    pub school: String,
    pub dept: String,
    pub number: String,
    pub title: String,
    pub home: bool,
}

impl RowView {
    pub fn new(record: &CourseRecord, home: &HomeInstitution) -> Self {
        let code = record.split_code();
        Self {
            cid: record.equivalency_id.trim().to_string(),
            school: record.institution.trim().to_string(),
            dept: code.department,
            number: code.number,
            title: record.local_title.trim().to_string(),
            home: home.matches(record),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [&self.cid, &self.school, &self.dept, &self.number, &self.title]
    }
}

#[derive(Debug, Serialize)]
struct ResultsView<'a> {
    heading: &'a str,
    summary: String,
    cids: usize,
    total: usize,
    truncated: bool,
    rows: Vec<RowView>,
}

#[derive(Debug, Serialize)]
struct MessageView<'a> {
    heading: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchView<'a> {
    path: &'a str,
    institutions: &'a [String],
    departments: &'a [String],
    titles: &'a [String],
    expanded: bool,
    latency_us: u64,
    #[serde(flatten)]
    results: ResultsView<'a>,
}

/// Writes results in the configured format
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    max_rows: usize,
    title_len: usize,
    home: HomeInstitution,
}

impl Renderer {
    pub fn new(format: OutputFormat, config: &AppConfig) -> Self {
        Self {
            format,
            max_rows: config.max_display_results,
            title_len: config.title_display_len,
            home: HomeInstitution::new(config.engine.home_institution.clone()),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Result table under a heading, or "No courses found"
    pub fn results<W: Write>(
        &self,
        out: &mut W,
        heading: &str,
        results: &ResultSet<'_>,
    ) -> io::Result<()> {
        if results.is_empty() {
            return self.message(out, heading, NO_COURSES);
        }

        let view = self.results_view(heading, results);
        match self.format {
            OutputFormat::Json => write_json(out, &view),
            OutputFormat::Table => {
                writeln!(out, "{}", heading)?;
                writeln!(out, "{}", view.summary)?;
                self.table(out, &view.rows)
            }
        }
    }

    /// A search outcome; JSON output also carries the classified tokens
    pub fn search<W: Write>(
        &self,
        out: &mut W,
        query: &str,
        outcome: &SearchOutcome<'_>,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => self.results(out, query, &outcome.results),
            OutputFormat::Json => {
                let view = SearchView {
                    path: outcome.path.as_str(),
                    institutions: &outcome.institutions,
                    departments: &outcome.departments,
                    titles: &outcome.titles,
                    expanded: outcome.expanded,
                    latency_us: outcome.latency_us,
                    results: self.results_view(query, &outcome.results),
                };
                write_json(out, &view)
            }
        }
    }

    /// Equivalents of one home course
    pub fn equivalency<W: Write>(
        &self,
        out: &mut W,
        heading: &str,
        outcome: &EquivalencyOutcome<'_>,
    ) -> io::Result<()> {
        match outcome {
            EquivalencyOutcome::Found(results) => self.results(out, heading, results),
            EquivalencyOutcome::CourseNotFound => self.message(out, heading, COURSE_NOT_FOUND),
            EquivalencyOutcome::NoEquivalency => self.message(out, heading, NO_EQUIVALENCY),
        }
    }

    pub fn departments<W: Write>(&self, out: &mut W, departments: &[&str]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, &departments),
            OutputFormat::Table => {
                for department in departments {
                    writeln!(out, "{}", department)?;
                }
                Ok(())
            }
        }
    }

    /// `6A (ACCT 110) :: Financial Accounting` lines for one department
    pub fn listing<W: Write>(
        &self,
        out: &mut W,
        department: &str,
        entries: &[CourseEntry],
    ) -> io::Result<()> {
        if entries.is_empty() {
            return self.message(out, department, NO_COURSES);
        }
        match self.format {
            OutputFormat::Json => write_json(out, &entries),
            OutputFormat::Table => {
                for entry in entries {
                    writeln!(out, "{}", entry.display(self.title_len))?;
                }
                Ok(())
            }
        }
    }

    pub fn message<W: Write>(&self, out: &mut W, heading: &str, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, &MessageView { heading, message }),
            OutputFormat::Table => {
                if !heading.is_empty() {
                    writeln!(out, "{}", heading)?;
                }
                writeln!(out, "{}", message)
            }
        }
    }

    fn results_view<'a>(&self, heading: &'a str, results: &ResultSet<'_>) -> ResultsView<'a> {
        let total = results.len();
        let cids = results.equivalency_ids().len();
        ResultsView {
            heading,
            summary: summary(cids, total, self.max_rows),
            cids,
            total,
            truncated: total > self.max_rows,
            rows: results
                .truncated(self.max_rows)
                .iter()
                .map(|r| RowView::new(r, &self.home))
                .collect(),
        }
    }

    fn table<W: Write>(&self, out: &mut W, rows: &[RowView]) -> io::Result<()> {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(out, " ", &HEADERS, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        write_row(out, " ", &rule, &widths)?;

        for row in rows {
            let mark = if row.home { HOME_MARK } else { " " };
            write_row(out, mark, &row.cells(), &widths)?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(
    out: &mut W,
    mark: &str,
    cells: &[&str],
    widths: &[usize],
) -> io::Result<()> {
    let mut line = String::from(mark);
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
        line.push(' ');
    }
    writeln!(out, "{}", line.trim_end())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

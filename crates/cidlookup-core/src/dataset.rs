//! CSV loading and validation
//!
//! The loader reads every row of the equivalency table, refuses files that
//! cannot be searched (missing, unreadable, empty, or lacking a required
//! column), and normalizes each record once so that searches only do plain
//! substring tests.

use crate::error::{Error, Result};
use crate::types::{
    CourseRecord, COL_EQUIVALENCY_ID, COL_EQUIVALENCY_LABEL, COL_INSTITUTION, COL_LOCAL_CODE,
    COL_LOCAL_TITLE, REQUIRED_COLUMNS,
};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The loaded, normalized equivalency table
///
/// Records keep their file order and are never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CourseRecord>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from records that are already in memory
    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load and validate a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = absolute(path.as_ref());
        let file_name = display_name(&path);

        if !path.is_file() {
            let folder = path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            return Err(Error::data_format(format!(
                "Data file not found: {file_name}\n\n\
                 Place a file named '{file_name}' in this folder:\n{folder}"
            )));
        }

        let reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| unreadable(&file_name, e))?;

        let mut dataset = Self::from_csv(reader, &file_name)?;
        info!(
            rows = dataset.len(),
            path = %path.display(),
            "Loaded equivalency table"
        );
        dataset.source = Some(path);
        Ok(dataset)
    }

    /// Load and validate CSV content from any reader
    ///
    /// `name` is the file name used in error messages.
    pub fn from_reader<R: Read>(reader: R, name: &str) -> Result<Self> {
        let reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::from_csv(reader, name)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, name: &str) -> Result<Self> {
        let headers = reader.headers().map_err(|e| unreadable(name, e))?.clone();

        let mut rows = Vec::new();
        for row in reader.records() {
            rows.push(row.map_err(|e| unreadable(name, e))?);
        }

        if rows.is_empty() {
            return Err(Error::data_format(format!(
                "{name} is empty.\n\n\
                 The file must contain a header row and at least one data row."
            )));
        }

        let columns = ColumnMap::resolve(&headers, name)?;
        debug!(rows = rows.len(), columns = headers.len(), "Parsed CSV rows");

        let records = rows.iter().map(|row| columns.record(row)).collect();

        Ok(Self {
            records,
            source: None,
        })
    }

    /// All records in file order
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    /// Iterate over all records in file order
    pub fn iter(&self) -> std::slice::Iter<'_, CourseRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path the dataset was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CourseRecord;
    type IntoIter = std::slice::Iter<'a, CourseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Positions of the required columns within the header row
struct ColumnMap {
    equivalency_id: usize,
    equivalency_label: usize,
    institution: usize,
    local_title: usize,
    local_code: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, name: &str) -> Result<Self> {
        let position = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| position(c).is_none())
            .collect();

        if !missing.is_empty() {
            let required = REQUIRED_COLUMNS
                .iter()
                .map(|c| format!("  • {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(Error::data_format(format!(
                "{name} is missing required column(s).\n\n\
                 Missing: {}\n\n\
                 Required columns (exact names):\n{required}",
                missing.join(", ")
            )));
        }

        let index = |column: &str| {
            position(column).ok_or_else(|| {
                Error::internal(format!("column '{column}' vanished after validation"))
            })
        };

        Ok(Self {
            equivalency_id: index(COL_EQUIVALENCY_ID)?,
            equivalency_label: index(COL_EQUIVALENCY_LABEL)?,
            institution: index(COL_INSTITUTION)?,
            local_title: index(COL_LOCAL_TITLE)?,
            local_code: index(COL_LOCAL_CODE)?,
        })
    }

    /// Build a record, reading absent trailing cells as empty
    fn record(&self, row: &StringRecord) -> CourseRecord {
        let cell = |i: usize| row.get(i).unwrap_or_default();
        CourseRecord::new(
            cell(self.equivalency_id),
            cell(self.equivalency_label),
            cell(self.institution),
            cell(self.local_title),
            cell(self.local_code),
        )
    }
}

fn unreadable(name: &str, err: csv::Error) -> Error {
    Error::data_format(format!(
        "Could not read {name} as CSV.\n\n\
         Make sure the file is a valid CSV (comma-separated, UTF-8).\n\
         Detail: {err}"
    ))
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Dataset loading and cleaning
//!
//! A [`Dataset`] is an in-memory, ordered set of rows whose cells have all
//! been coerced to numbers. Loading picks a parser by file extension, then
//! [`cleaning::clean`] applies the fixed cleaning pipeline.

pub mod cleaning;
pub mod delimited;
pub mod spreadsheet;

pub use cleaning::CleaningStats;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions accepted when scanning a directory for datasets
pub const DATASET_EXTENSIONS: &[&str] = &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"];

/// The only error the analysis pipeline surfaces: the input could not be
/// read or parsed as a table.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to open spreadsheet {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("spreadsheet {} has no worksheets", path.display())]
    NoWorksheet { path: PathBuf },
    #[error("no columns to parse from {}", path.display())]
    NoColumns { path: PathBuf },
}

/// Text values read as missing, matching the usual spreadsheet and
/// dataframe conventions for "not available"
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single raw cell as read from the file, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Cell for a text field; missing markers (compared verbatim) are empty
    pub fn from_text(text: &str) -> Self {
        if MISSING_MARKERS.contains(&text) {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Parsed table with headers kept verbatim (apart from de-duplication)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table from header cells, naming blank headers `Unnamed: <i>`
    /// and suffixing repeated ones with `.1`, `.2`, ...
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            headers: normalize_headers(headers),
            rows,
        }
    }
}

fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Cleaned, fully numeric dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// Build a dataset from already-numeric rows. Short rows are padded with 0.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, 0.0);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Load and clean a dataset, choosing the parser by extension
    pub fn load(path: &Path) -> Result<(Self, CleaningStats), DatasetLoadError> {
        let raw = if is_csv(path) {
            delimited::read_csv(path)?
        } else {
            spreadsheet::read_first_sheet(path)?
        };
        Ok(cleaning::clean(raw))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column in row order
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Column sum, or 0 when the column does not exist
    pub fn sum(&self, name: &str) -> f64 {
        self.column(name)
            .map(|values| values.iter().sum())
            .unwrap_or(0.0)
    }

    /// Column mean, or 0 when the column does not exist or has no rows
    pub fn mean(&self, name: &str) -> f64 {
        match self.column(name) {
            Some(values) if !values.is_empty() => {
                values.iter().sum::<f64>() / values.len() as f64
            }
            _ => 0.0,
        }
    }
}

/// Whether a path is parsed as CSV (everything else goes to the spreadsheet reader)
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Whether a path looks like a dataset file when scanning directories
pub fn is_dataset_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            DATASET_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

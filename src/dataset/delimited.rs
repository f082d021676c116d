//! CSV reader

use super::{Cell, DatasetLoadError, RawTable};
use std::io::Read;
use std::path::Path;

/// Read a CSV file whose first record is the header row
pub fn read_csv(path: &Path) -> Result<RawTable, DatasetLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(file).map_err(|e| match e {
        CsvReadError::Csv(source) => DatasetLoadError::Csv {
            path: path.to_path_buf(),
            source,
        },
        CsvReadError::NoColumns => DatasetLoadError::NoColumns {
            path: path.to_path_buf(),
        },
    })
}

#[derive(Debug)]
enum CsvReadError {
    Csv(csv::Error),
    NoColumns,
}

impl From<csv::Error> for CsvReadError {
    fn from(e: csv::Error) -> Self {
        CsvReadError::Csv(e)
    }
}

fn read_csv_from<R: Read>(input: R) -> Result<RawTable, CsvReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(CsvReadError::NoColumns);
    }
    let width = headers.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<Cell> = record
            .iter()
            .take(width)
            .map(Cell::from_text)
            .collect();
        // Missing trailing fields are missing cells
        row.resize(width, Cell::Empty);
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}

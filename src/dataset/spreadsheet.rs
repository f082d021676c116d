//! Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods) backed by calamine

use super::{Cell, DatasetLoadError, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Read the first worksheet; its first row is the header row
pub fn read_first_sheet(path: &Path) -> Result<RawTable, DatasetLoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| DatasetLoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetLoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| DatasetLoadError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return Ok(RawTable::default()),
    };

    let body = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<Cell>>())
        .collect();

    Ok(RawTable::new(headers, body))
}

fn header_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::from_text(s),
        other => Cell::from_text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_stay_numeric() {
        assert_eq!(to_cell(&Data::Float(12.5)), Cell::Number(12.5));
        assert_eq!(to_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Bool(true));
    }

    #[test]
    fn blank_cells_are_missing() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(to_cell(&Data::String("#N/A".to_string())), Cell::Empty);
    }

    #[test]
    fn text_headers_are_verbatim() {
        assert_eq!(header_text(&Data::String("Cash In ".to_string())), "Cash In ");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn unsupported_extension_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "revenue\n1\n").unwrap();
        let err = read_first_sheet(&path).unwrap_err();
        assert!(matches!(err, DatasetLoadError::Spreadsheet { .. }));
    }
}

//! Cleaning pipeline: drop blank rows, fill missing cells, coerce to numbers

use super::{Cell, Dataset, RawTable};
use serde::Serialize;
use tracing::debug;

/// Counters describing what cleaning changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Data rows read from the file (header excluded)
    pub rows_read: usize,
    /// Rows dropped because every cell was missing
    pub rows_dropped: usize,
    /// Missing cells filled with zero
    pub cells_filled: usize,
    /// Non-missing cells that failed numeric coercion and became zero
    pub cells_coerced: usize,
}

/// Apply the cleaning steps in order:
/// 1. drop rows where every cell is missing
/// 2. fill missing cells with zero
/// 3. coerce every cell to a number, unparseable cells become zero
/// 4. fill again (NaN produced by coercion becomes zero)
///
/// Every column is coerced, including free-text ones such as notes or
/// labels, which therefore end up all zero.
pub fn clean(raw: RawTable) -> (Dataset, CleaningStats) {
    let mut stats = CleaningStats {
        rows_read: raw.rows.len(),
        ..CleaningStats::default()
    };

    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in raw.rows {
        if row.iter().all(Cell::is_empty) {
            stats.rows_dropped += 1;
            continue;
        }
        let numeric: Vec<f64> = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => {
                    stats.cells_filled += 1;
                    0.0
                }
                other => match coerce(other) {
                    Some(v) => v,
                    None => {
                        stats.cells_coerced += 1;
                        0.0
                    }
                },
            })
            .collect();
        rows.push(numeric);
    }

    debug!(
        rows_read = stats.rows_read,
        rows_dropped = stats.rows_dropped,
        cells_filled = stats.cells_filled,
        cells_coerced = stats.cells_coerced,
        "cleaned dataset"
    );

    (Dataset::new(raw.headers, rows), stats)
}

/// Numeric value of a non-missing cell, `None` when it cannot be parsed
/// (or parses to NaN)
pub fn coerce(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(n) => *n,
        Cell::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Cell::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

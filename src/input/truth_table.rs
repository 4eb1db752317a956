//! Truth-table file ingestion
//!
//! Accepts rows separated by line breaks with cells separated by commas,
//! tabs, or spaces; tolerates an optional header row and an optional
//! row-label column. Produces the canonical fully populated table.

use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use super::{OutputValue, TruthTable, check_extension, fill_gaps};
use crate::error::Error;
use crate::qm::MAX_VARIABLES;

/// One tokenized cell. Integer coercion is attempted per cell; anything that
/// fails stays text, which is how header and label cells are recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    fn is_table_value(&self) -> bool {
        matches!(self, Cell::Int(0) | Cell::Int(1)) || self.is_dont_care()
    }

    fn is_dont_care(&self) -> bool {
        matches!(self, Cell::Text(t) if t == "x")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Canonicalize a truth-table file.
pub fn canonicalize_file(path: &Path) -> Result<TruthTable, Error> {
    check_extension(path)?;

    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    canonicalize_text(&text)
}

/// Canonicalize truth-table text: tokenize, strip header and label column,
/// validate, sort by row value, and fill the gaps with don't-care rows.
pub fn canonicalize_text(text: &str) -> Result<TruthTable, Error> {
    let splitter = Regex::new(r"[,\t ]")?;

    let mut rows: Vec<Vec<Cell>> = text
        .lines()
        .map(|line| {
            splitter
                .split(line.trim())
                .filter(|token| !token.is_empty())
                .map(|token| match token.parse::<i64>() {
                    Ok(value) => Cell::Int(value),
                    Err(_) => Cell::Text(token.to_string()),
                })
                .collect::<Vec<Cell>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(Error::EmptyInput);
    }
    if rows.len() == 1 {
        return Err(Error::SingleLineInput);
    }

    if !rows[0][0].is_table_value() {
        info!("cell (1,1) is not 0, 1, or x; dropping header row");
        rows.remove(0);
    }
    if !rows[0][0].is_table_value() {
        info!("cell (1,1) is still not 0, 1, or x; dropping label column");
        for row in &mut rows {
            row.remove(0);
        }
    }

    let row_length = rows[0].len();
    if row_length < 2 {
        return Err(Error::TooFewColumns { row: 1 });
    }
    let variables = row_length - 1;
    if variables > MAX_VARIABLES {
        return Err(Error::TooManyVariables { variables });
    }

    let max_rows: u128 = 1 << variables;
    if rows.len() as u128 > max_rows {
        return Err(Error::TooManyRows {
            rows: rows.len(),
            max_rows,
        });
    }

    let mut entries = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if row.len() != row_length {
            return Err(Error::RaggedRow { row: i + 1 });
        }

        let mut index = 0u64;
        for (y, cell) in row.iter().enumerate() {
            if !cell.is_table_value() {
                return Err(Error::InvalidCell {
                    row: i + 1,
                    column: y + 1,
                    value: cell.to_string(),
                });
            }
            if cell.is_dont_care() && y != row_length - 1 {
                return Err(Error::MisplacedDontCare {
                    row: i + 1,
                    column: y + 1,
                });
            }
            if y < variables {
                index = (index << 1) | u64::from(*cell == Cell::Int(1));
            }
        }

        let output = match row[row_length - 1] {
            Cell::Int(0) => OutputValue::Zero,
            Cell::Int(1) => OutputValue::One,
            _ => OutputValue::DontCare,
        };
        entries.push((index, output));
    }

    entries.sort_by_key(|&(index, _)| index);
    for pair in entries.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(Error::DuplicateRow { index: pair[0].0 });
        }
    }

    debug!(
        rows = entries.len(),
        variables,
        "canonicalized truth table input"
    );

    Ok(TruthTable {
        variables,
        rows: fill_gaps(&entries, variables),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_table_passes_through_unchanged() {
        let table = canonicalize_text("0,0,1\n0,1,0\n1,0,1\n1,1,1\n").unwrap();
        assert_eq!(table.variables, 2);
        assert_eq!(table.on_set(), vec![0, 2, 3]);
        assert!(table.dc_set().is_empty());
    }

    #[test]
    fn header_row_is_dropped() {
        let table = canonicalize_text("A,B,F\n0,0,1\n0,1,0\n").unwrap();
        assert_eq!(table.variables, 2);
        assert_eq!(table.on_set(), vec![0]);
        assert_eq!(table.dc_set(), vec![2, 3]);
    }

    #[test]
    fn header_and_label_column_are_dropped() {
        let table = canonicalize_text("row,A,B,F\nr0,0,0,1\nr1,0,1,0\n").unwrap();
        assert_eq!(table.variables, 2);
        assert_eq!(table.on_set(), vec![0]);
    }

    #[test]
    fn tabs_and_spaces_also_separate_cells() {
        let table = canonicalize_text("0\t0\t1\n1 1 1\n").unwrap();
        assert_eq!(table.on_set(), vec![0, 3]);
    }

    #[test]
    fn missing_rows_become_dont_cares() {
        let table = canonicalize_text("0,0,1\n1,1,0\n").unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.dc_set(), vec![1, 2]);
    }

    #[test]
    fn unsorted_rows_are_sorted_by_value() {
        let table = canonicalize_text("1,1,1\n0,0,1\n").unwrap();
        let indices: Vec<u64> = table.rows.iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(table.on_set(), vec![0, 3]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(canonicalize_text(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn single_line_is_rejected() {
        assert!(matches!(
            canonicalize_text("0,0,1"),
            Err(Error::SingleLineInput)
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            canonicalize_text("0,0,1\n0,1\n"),
            Err(Error::RaggedRow { row: 2 })
        ));
    }

    #[test]
    fn bad_cell_is_rejected() {
        assert!(matches!(
            canonicalize_text("0,0,1\n0,2,1\n"),
            Err(Error::InvalidCell { row: 2, column: 2, .. })
        ));
    }

    #[test]
    fn misplaced_dont_care_is_rejected() {
        assert!(matches!(
            canonicalize_text("0,0,1\nx,1,1\n"),
            Err(Error::MisplacedDontCare { row: 2, column: 1 })
        ));
    }

    #[test]
    fn too_many_rows_is_rejected() {
        let text = "0,0\n0,1\n1,0\n1,1\n0,0\n";
        assert!(matches!(
            canonicalize_text(text),
            Err(Error::TooManyRows { rows: 5, .. })
        ));
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        assert!(matches!(
            canonicalize_text("0,0,1\n0,0,0\n"),
            Err(Error::DuplicateRow { index: 0 })
        ));
    }

    #[test]
    fn dont_care_output_is_accepted() {
        let table = canonicalize_text("0,0,x\n0,1,1\n").unwrap();
        assert_eq!(table.on_set(), vec![1]);
        assert_eq!(table.dc_set(), vec![0, 2, 3]);
    }
}

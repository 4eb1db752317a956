use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the canonicalizer, the engine, and the output stage.
///
/// Nothing is caught internally for recovery; every variant propagates to the
/// binary entry point, which prints one diagnostic line and exits non-zero.
#[derive(Debug)]
pub enum Error {
    // Usage errors; flag conflicts are enforced by the argument parser
    /// The file extension is not one of the supported table formats
    UnsupportedFiletype {
        extension: String,
    },
    /// The number of labels does not match the number of input variables
    LabelCountMismatch {
        labels: usize,
        variables: usize,
    },
    /// The function has more input variables than the engine supports
    TooManyVariables {
        variables: usize,
    },

    // Input format errors
    /// The input file contains no rows
    EmptyInput,
    /// The input file contains a single line
    SingleLineInput,
    /// A row has fewer than one input bit plus one output value
    TooFewColumns {
        row: usize,
    },
    /// A row differs in length from the first row
    RaggedRow {
        row: usize,
    },
    /// A cell holds something other than `0`, `1`, or `x`
    InvalidCell {
        row: usize,
        column: usize,
        value: String,
    },
    /// An `x` appears outside the output column
    MisplacedDontCare {
        row: usize,
        column: usize,
    },
    /// Two rows encode the same minterm index
    DuplicateRow {
        index: u64,
    },
    /// An index list contained no parseable values
    EmptyIndexList {
        list: &'static str,
    },
    /// A minterm index is negative
    NegativeIndex {
        value: i64,
    },
    /// The same index appears in both the ON-set and the DC-set
    IndexOverlap {
        index: u64,
    },
    /// A minterm index does not fit the stated variable count
    IndexOutOfRange {
        index: u64,
        variables: usize,
    },

    // Capacity errors
    /// The table has more rows than 2^n
    TooManyRows {
        rows: usize,
        max_rows: u128,
    },
    /// The `_1`, `_2`, ... rename search found no free name
    RenameCeiling {
        attempts: u32,
    },

    // I/O errors
    /// The input file does not exist
    FileNotFound {
        path: PathBuf,
    },
    /// Reading or writing a file failed
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// A bucket, width, or cover-count assertion failed; a bug, not user error
    InternalInvariant {
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFiletype { extension } => {
                write!(
                    f,
                    "filetype `{}` not supported, must be one of: .txt, .md, .tsv, .csv",
                    extension
                )
            }
            Error::LabelCountMismatch { labels, variables } => {
                write!(f, "{} labels given for {} input variables", labels, variables)
            }
            Error::TooManyVariables { variables } => {
                write!(
                    f,
                    "function must have between 1 and 64 input variables, got {}",
                    variables
                )
            }
            Error::EmptyInput => write!(f, "input file contains no content"),
            Error::SingleLineInput => {
                write!(
                    f,
                    "input file contains only one line; each row must be separated by a new line"
                )
            }
            Error::TooFewColumns { row } => {
                write!(
                    f,
                    "row {} must contain at least one input bit and one output value",
                    row
                )
            }
            Error::RaggedRow { row } => {
                write!(f, "input table is malformed; row {} is not the same length as row 1", row)
            }
            Error::InvalidCell { row, column, value } => {
                write!(
                    f,
                    "table data in row {}, cell {} is invalid; `{}` is not 0, 1, or x",
                    row, column, value
                )
            }
            Error::MisplacedDontCare { row, column } => {
                write!(
                    f,
                    "table data in row {}, cell {} is invalid; `x` may only exist in the last column",
                    row, column
                )
            }
            Error::DuplicateRow { index } => {
                write!(f, "input table contains more than one row for minterm {}", index)
            }
            Error::EmptyIndexList { list } => {
                write!(
                    f,
                    "invalid {} specification; values must be integers separated by commas",
                    list
                )
            }
            Error::NegativeIndex { value } => {
                write!(f, "cannot specify negative minterms: `{}`", value)
            }
            Error::IndexOverlap { index } => {
                write!(f, "cannot specify {} as both a minterm and a don't care", index)
            }
            Error::IndexOutOfRange { index, variables } => {
                write!(
                    f,
                    "minterm index {} does not fit in {} input variables",
                    index, variables
                )
            }
            Error::TooManyRows { rows, max_rows } => {
                write!(
                    f,
                    "input table contains {} rows; the maximum for this table is {}. \
                     Remove duplicate or conflicting rows",
                    rows, max_rows
                )
            }
            Error::RenameCeiling { attempts } => {
                write!(
                    f,
                    "maximum number of file rename checks reached ({}); choose a different output name",
                    attempts
                )
            }
            Error::FileNotFound { path } => write!(f, "file not found: {}", path.display()),
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::InternalInvariant { detail } => {
                write!(f, "internal invariant violated: {}", detail)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// The split patterns are literals; a compile failure is a bug.
impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Error::InternalInvariant { detail: e.to_string() }
    }
}

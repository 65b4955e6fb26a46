/// Error types for loading the dataset
use thiserror::Error;

/// Failure to turn the source CSV into a [`crate::record::Table`].
///
/// Any of these leaves the page without data; callers render a "no data"
/// state instead of aborting.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file is missing or could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file has no content at all
    #[error("Data file is empty")]
    Empty,

    /// The file has a header row but no data rows
    #[error("Data file contains no records")]
    NoRecords,

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A row has a different number of fields than the header
    #[error("Inconsistent column count on line {line} (expected: {expected}, found: {found})")]
    InconsistentColumns { line: u64, expected: u64, found: u64 },

    /// The date field could not be parsed
    #[error("Failed to parse date on line {line}: {value:?}")]
    InvalidDate { line: u64, value: String },

    /// A numeric field could not be parsed as a finite real
    #[error("Failed to parse {column} on line {line}: {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// Any other CSV reader failure
    #[error("Failed to parse CSV: {0}")]
    Csv(csv::Error),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = err.kind()
        {
            return LoadError::InconsistentColumns {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            };
        }
        LoadError::Csv(err)
    }
}

/// Type alias for Results using LoadError
pub type Result<T> = std::result::Result<T, LoadError>;

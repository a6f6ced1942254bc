//! Error types for tabular data loading and access.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or reading tabular data.
#[derive(Error, Debug)]
pub enum DataError {
    /// A column was requested by a name the table does not declare.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A row index beyond the table length was requested.
    #[error("row {row} out of bounds (table has {rows} rows)")]
    RowOutOfBounds { row: usize, rows: usize },

    /// Columns of differing lengths were combined into one table.
    #[error("column '{column}' has {actual} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// The input carried no header row or no data at all.
    #[error("input contains no rows")]
    EmptyInput,

    /// Delimited-text parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet parse error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

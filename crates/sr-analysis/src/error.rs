//! Error types for the analysis engine.

use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while running analyses.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required input column is absent. The run fails as a whole; no
    /// partial results are produced.
    #[error("required column '{0}' missing from input table")]
    MissingColumn(String),

    /// A grouping aggregation was declared without a group column.
    #[error("analysis '{0}' declares a grouping aggregation but no group column")]
    MissingGroupColumn(String),

    /// Underlying table access error.
    #[error("table error: {0}")]
    Data(#[from] sr_data::DataError),
}

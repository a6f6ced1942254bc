//! Error types for chart rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a chart.
///
/// Every variant carries the offending analysis title so the caller can
/// report which chart failed.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The analysis produced an empty series; there is nothing to draw.
    #[error("analysis '{title}' produced an empty series")]
    EmptySeries { title: String },

    /// The series table is missing a column the chart form expects.
    #[error("analysis '{title}' produced an unreadable series: {source}")]
    Series {
        title: String,
        #[source]
        source: sr_data::DataError,
    },

    /// The drawing backend failed.
    #[error("failed to draw '{title}': {reason}")]
    Draw { title: String, reason: String },

    /// Transient image resource could not be allocated or read back.
    #[error("image resource error for '{title}': {source}")]
    Resource {
        title: String,
        #[source]
        source: std::io::Error,
    },
}

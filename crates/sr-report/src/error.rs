//! Error types for document assembly and pipeline orchestration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T, E = ReportError> = std::result::Result<T, E>;

/// Errors that can occur while assembling the document.
///
/// Transient chart resources are released before any of these propagate.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Assembly was invoked with no charts.
    #[error("no charts to assemble")]
    NoCharts,

    /// A chart image could not be decoded or embedded.
    #[error("failed to embed chart image '{title}': {reason}")]
    Image { title: String, reason: String },

    /// PDF composition or serialization failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// The persisted copy could not be written.
    #[error("failed to persist report to '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pipeline-level errors: all-or-nothing per stage.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Schema validation or aggregation failed; no charts were produced.
    #[error("analysis failed: {0}")]
    Analysis(#[from] sr_analysis::AnalysisError),

    /// A chart failed to render; the remaining sequence is aborted and no
    /// document is produced.
    #[error("chart rendering failed: {0}")]
    Render(#[from] sr_chart::RenderError),

    /// Document assembly failed after charts were produced.
    #[error("document assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
}

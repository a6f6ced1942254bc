//! Report configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Well-known location of the persisted report, overwritten per invocation.
pub const DEFAULT_OUTPUT_PATH: &str = "data_analysis_report.pdf";

/// Header stamped on every page.
pub const PAGE_HEADER: &str = "Data Analysis Report";

/// Width every embedded chart image is scaled to, in millimeters.
pub const IMAGE_WIDTH_MM: f32 = 190.0;

/// Document assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where the persisted copy is written. A single mutable slot: callers
    /// must not run concurrent assemblies against the same path.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Header text stamped on every page.
    #[serde(default = "default_page_header")]
    pub page_header: String,

    /// Fixed width of embedded chart images; height scales proportionally.
    #[serde(default = "default_image_width")]
    pub image_width_mm: f32,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_page_header() -> String {
    PAGE_HEADER.to_string()
}

fn default_image_width() -> f32 {
    IMAGE_WIDTH_MM
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            page_header: default_page_header(),
            image_width_mm: IMAGE_WIDTH_MM,
        }
    }
}

impl ReportConfig {
    /// Override the persisted copy location.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

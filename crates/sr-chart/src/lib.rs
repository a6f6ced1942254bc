//! Raster chart rendering for sales analyses.
//!
//! Converts one [`sr_analysis::AnalysisResult`] into a rendered PNG plus its
//! caption. Each render allocates one transient on-disk image, owned by the
//! returned [`RenderedChart`] until the document assembler releases it.
//!
//! Rendering is stateless and deterministic for identical input data and a
//! fixed [`ChartConfig`]. The input result is never mutated.

pub mod chart;
pub mod error;
pub mod renderer;

pub use chart::{ChartConfig, RenderedChart};
pub use error::{RenderError, Result};
pub use renderer::Renderer;

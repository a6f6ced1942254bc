//! Rendered chart artifact and render configuration.

use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

/// Fixed output size for every chart.
///
/// 10×6 chart units at 100 pixels per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    /// Output width in pixels.
    pub width_px: u32,
    /// Output height in pixels.
    pub height_px: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_px: 1000,
            height_px: 600,
        }
    }
}

/// A rendered chart: PNG bytes plus the caption, owning the transient
/// on-disk image backing it.
///
/// The temp file exists until [`RenderedChart::release`] is called (or the
/// value is dropped). Release is idempotent.
#[derive(Debug)]
pub struct RenderedChart {
    /// Chart and page title.
    pub title: String,
    /// Narrative caption for the report page.
    pub summary: String,
    /// Encoded PNG image.
    pub image_bytes: Vec<u8>,
    temp: Option<NamedTempFile>,
}

impl RenderedChart {
    pub(crate) fn new(
        title: String,
        summary: String,
        image_bytes: Vec<u8>,
        temp: NamedTempFile,
    ) -> Self {
        Self {
            title,
            summary,
            image_bytes,
            temp: Some(temp),
        }
    }

    /// Path of the transient image, while it is still held.
    pub fn temp_path(&self) -> Option<&Path> {
        self.temp.as_ref().map(NamedTempFile::path)
    }

    /// Release the transient image resource.
    ///
    /// Safe to call more than once; subsequent calls are no-ops. Removal
    /// failures are logged, not propagated: the rendered bytes stay valid.
    pub fn release(&mut self) {
        if let Some(temp) = self.temp.take() {
            let path = temp.path().to_path_buf();
            if let Err(err) = temp.close() {
                warn!(path = %path.display(), error = %err, "failed to remove transient chart image");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn chart_with_temp() -> RenderedChart {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"png").unwrap();
        RenderedChart::new(
            "Sales Distribution".to_string(),
            "caption".to_string(),
            b"png".to_vec(),
            temp,
        )
    }

    #[test]
    fn release_removes_the_backing_file() {
        let mut chart = chart_with_temp();
        let path = chart.temp_path().unwrap().to_path_buf();
        assert!(path.exists());
        chart.release();
        assert!(!path.exists());
        assert!(chart.temp_path().is_none());
        // Bytes survive the release.
        assert_eq!(chart.image_bytes, b"png");
    }

    #[test]
    fn release_is_idempotent() {
        let mut chart = chart_with_temp();
        chart.release();
        chart.release();
        assert!(chart.temp_path().is_none());
    }
}

//! Two-phase document assembly.

use crate::config::ReportConfig;
use crate::error::AssemblyError;
use crate::Result;

use chrono::{DateTime, Utc};
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};
use sr_chart::RenderedChart;
use std::fs;
use std::io::Cursor;
use tracing::{debug, info};

/// A4 page size in millimeters.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

/// Left margin for text and images.
const MARGIN_LEFT: f32 = 10.0;

const HEADER_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
/// Baseline step between body lines.
const LINE_STEP: f32 = 7.0;

const HEADER_BASELINE: f32 = PAGE_HEIGHT - 15.0;
const TITLE_BASELINE: f32 = PAGE_HEIGHT - 38.0;
const BODY_TOP_BASELINE: f32 = PAGE_HEIGHT - 50.0;
/// Top edge of embedded images.
const IMAGE_TOP: f32 = PAGE_HEIGHT - 28.0;

/// Approximate Helvetica advance per character, in fractions of the font
/// size. Close enough for wrapping narrative captions.
const AVG_ADVANCE: f32 = 0.52;
/// Millimeters per typographic point.
const MM_PER_PT: f32 = 0.3528;

/// What a single page carries. Pages are either narrative or image pages;
/// all narrative pages come before any image page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageKind {
    /// Title and caption of one chart.
    Narrative(usize),
    /// Image of one chart.
    Image(usize),
}

/// Fixed page order for a chart count: one narrative page per chart, then
/// one image page per chart, both in input order.
pub(crate) fn page_plan(chart_count: usize) -> Vec<PageKind> {
    (0..chart_count)
        .map(PageKind::Narrative)
        .chain((0..chart_count).map(PageKind::Image))
        .collect()
}

/// The assembled, serialized report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    /// Serialized PDF bytes. Immutable once produced.
    pub bytes: Vec<u8>,
    /// Location of the persisted copy.
    pub path: std::path::PathBuf,
    /// Total page count.
    pub page_count: usize,
    /// Assembly timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Accumulates rendered charts into a paginated PDF.
pub struct Assembler {
    config: ReportConfig,
}

impl Assembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assemble charts into the report document.
    ///
    /// Takes ownership of the charts and releases every transient image
    /// resource before returning, on success and on failure alike. The
    /// persisted copy at the configured path is overwritten.
    pub fn assemble(&self, mut charts: Vec<RenderedChart>) -> Result<ReportDocument, AssemblyError> {
        let outcome = self.compose(&charts);
        for chart in &mut charts {
            chart.release();
        }
        let bytes = outcome?;

        fs::write(&self.config.output_path, &bytes).map_err(|source| AssemblyError::Persist {
            path: self.config.output_path.clone(),
            source,
        })?;

        let page_count = 2 * charts.len();
        info!(
            pages = page_count,
            bytes = bytes.len(),
            path = %self.config.output_path.display(),
            "report assembled"
        );
        Ok(ReportDocument {
            bytes,
            path: self.config.output_path.clone(),
            page_count,
            generated_at: Utc::now(),
        })
    }

    fn compose(&self, charts: &[RenderedChart]) -> Result<Vec<u8>, AssemblyError> {
        if charts.is_empty() {
            return Err(AssemblyError::NoCharts);
        }
        let plan = page_plan(charts.len());
        debug!(charts = charts.len(), pages = plan.len(), "composing document");

        let (doc, first_page, first_layer) = PdfDocument::new(
            self.config.page_header.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "content",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        for (index, kind) in plan.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
                doc.get_page(page).get_layer(layer)
            };
            self.stamp_header(&layer, &bold);
            match *kind {
                PageKind::Narrative(i) => {
                    self.narrative_page(&layer, &charts[i], &bold, &regular)
                }
                PageKind::Image(i) => self.image_page(&layer, &charts[i])?,
            }
        }

        Ok(doc.save_to_bytes()?)
    }

    /// Stamp the fixed report header, centered, on one page.
    fn stamp_header(&self, layer: &PdfLayerReference, bold: &IndirectFontRef) {
        let text = &self.config.page_header;
        let width = text.chars().count() as f32 * HEADER_SIZE * AVG_ADVANCE * MM_PER_PT;
        let x = (PAGE_WIDTH - width) / 2.0;
        layer.use_text(
            text.as_str(),
            HEADER_SIZE,
            Mm(x.max(MARGIN_LEFT)),
            Mm(HEADER_BASELINE),
            bold,
        );
    }

    fn narrative_page(
        &self,
        layer: &PdfLayerReference,
        chart: &RenderedChart,
        bold: &IndirectFontRef,
        regular: &IndirectFontRef,
    ) {
        layer.use_text(
            chart.title.as_str(),
            TITLE_SIZE,
            Mm(MARGIN_LEFT),
            Mm(TITLE_BASELINE),
            bold,
        );

        let usable = PAGE_WIDTH - 2.0 * MARGIN_LEFT;
        let per_line = (usable / (BODY_SIZE * AVG_ADVANCE * MM_PER_PT)) as usize;
        let mut baseline = BODY_TOP_BASELINE;
        for line in wrap_text(&chart.summary, per_line) {
            layer.use_text(line, BODY_SIZE, Mm(MARGIN_LEFT), Mm(baseline), regular);
            baseline -= LINE_STEP;
        }
    }

    fn image_page(
        &self,
        layer: &PdfLayerReference,
        chart: &RenderedChart,
    ) -> Result<(), AssemblyError> {
        let embed_failure = |reason: String| AssemblyError::Image {
            title: chart.title.clone(),
            reason,
        };

        let decoder = PngDecoder::new(Cursor::new(chart.image_bytes.as_slice()))
            .map_err(|e| embed_failure(e.to_string()))?;
        let image = Image::try_from(decoder).map_err(|e| embed_failure(e.to_string()))?;

        let px_width = image.image.width.0 as f32;
        let px_height = image.image.height.0 as f32;
        // Scale so the image spans the fixed layout width.
        let dpi = px_width * 25.4 / self.config.image_width_mm;
        let height_mm = px_height * 25.4 / dpi;

        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT)),
                translate_y: Some(Mm(IMAGE_TOP - height_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

/// Greedy word-wrap to a maximum line width in characters.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_all_narratives_then_all_images() {
        let plan = page_plan(5);
        assert_eq!(plan.len(), 10);
        assert_eq!(plan[0], PageKind::Narrative(0));
        assert_eq!(plan[4], PageKind::Narrative(4));
        assert_eq!(plan[5], PageKind::Image(0));
        assert_eq!(plan[9], PageKind::Image(4));
        let first_image = plan.iter().position(|k| matches!(k, PageKind::Image(_))).unwrap();
        assert!(plan[..first_image]
            .iter()
            .all(|k| matches!(k, PageKind::Narrative(_))));
    }

    #[test]
    fn plan_for_zero_charts_is_empty() {
        assert!(page_plan(0).is_empty());
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, ["one two", "three", "four"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("", 80).is_empty());
    }

    #[test]
    fn assembling_nothing_is_an_error() {
        let err = Assembler::default().assemble(Vec::new()).unwrap_err();
        assert!(matches!(err, AssemblyError::NoCharts));
    }
}

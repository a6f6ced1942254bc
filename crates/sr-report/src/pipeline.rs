//! Report pipeline orchestration.

use crate::assembler::{Assembler, ReportDocument};
use crate::config::ReportConfig;
use crate::Result;

use sr_analysis::{run_analyses, standard_analyses, AnalysisSpec};
use sr_chart::{ChartConfig, RenderedChart, Renderer};
use sr_data::Table;
use tracing::{debug, info};

/// Runs the fixed analysis list over a table, renders one chart per
/// analysis, and assembles the report document.
///
/// Every stage is all-or-nothing: a schema failure aborts before any
/// rendering, a render failure aborts the remaining chart sequence, and an
/// assembly failure still releases every transient chart resource. Charts
/// rendered before an aborted run are cleaned up when they drop.
pub struct Pipeline {
    specs: Vec<AnalysisSpec>,
    chart_config: ChartConfig,
    assembler: Assembler,
}

impl Pipeline {
    /// Pipeline over the standard analysis catalog with default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Pipeline over the standard analysis catalog with a custom report
    /// configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        Self {
            specs: standard_analyses(),
            chart_config: ChartConfig::default(),
            assembler: Assembler::new(config),
        }
    }

    /// Replace the analysis catalog.
    pub fn with_analyses(mut self, specs: Vec<AnalysisSpec>) -> Self {
        self.specs = specs;
        self
    }

    /// Replace the chart size configuration.
    pub fn with_chart_config(mut self, config: ChartConfig) -> Self {
        self.chart_config = config;
        self
    }

    /// Generate the report document for a table.
    pub fn run(&self, table: &Table) -> Result<ReportDocument> {
        debug!(rows = table.rows(), analyses = self.specs.len(), "pipeline start");
        let results = run_analyses(table, &self.specs)?;

        let renderer = Renderer::new(self.chart_config);
        let mut charts: Vec<RenderedChart> = Vec::with_capacity(results.len());
        for result in &results {
            charts.push(renderer.render(result)?);
        }

        let document = self.assembler.assemble(charts)?;
        info!(
            pages = document.page_count,
            path = %document.path.display(),
            "pipeline complete"
        );
        Ok(document)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

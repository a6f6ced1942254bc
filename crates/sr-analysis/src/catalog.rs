//! Declarative analysis catalog.
//!
//! Each analysis is a data description: which aggregation to run, over which
//! value column, grouped by which column, and which chart form the renderer
//! should use. Adding an analysis means adding a catalog entry, not touching
//! pipeline control flow.

use crate::columns;
use serde::Serialize;

/// Default bin count for distribution analyses.
pub const DEFAULT_BINS: usize = 30;

/// How many ranked entries the top-customers analysis keeps.
pub const TOP_CUSTOMERS: usize = 10;

/// Ordering of groups in a grouped-sum series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Ascending by group key (numeric when every key parses as a number).
    KeyAscending,
    /// Descending by aggregated total; ties keep first-seen input order.
    TotalDescending,
}

/// The aggregation a single analysis performs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    /// Equal-width binned frequency of the value column.
    Distribution { bins: usize },
    /// Median, quartiles and whisker bounds of the value column per group.
    FiveNumberSummary,
    /// Sum of the value column per group.
    GroupedSum { order: GroupOrder },
    /// The `n` groups with the largest summed value, descending.
    TopN { n: usize },
}

/// The chart form a rendered analysis takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bars over contiguous numeric bins.
    Histogram,
    /// Box-and-whisker per group.
    Boxplot,
    /// Vertical bars per group.
    Bars,
    /// Vertical bars with rotated, truncated category labels.
    RotatedBars,
    /// Horizontal bars, largest first.
    HorizontalBars,
}

/// One named aggregation over the input table.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSpec {
    /// Chart and page title.
    pub title: String,
    /// Fixed narrative caption for the report page.
    pub summary: String,
    /// Aggregation to perform.
    pub kind: AggregationKind,
    /// Column the aggregation measures.
    pub value_column: String,
    /// Column the aggregation groups by, when the kind groups.
    pub group_column: Option<String>,
    /// Chart form for the renderer.
    pub chart: ChartKind,
}

impl AnalysisSpec {
    /// Columns this analysis requires in the input table.
    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.value_column.as_str()).chain(self.group_column.as_deref())
    }
}

/// The fixed standard catalog: five sales analyses, in report order.
pub fn standard_analyses() -> Vec<AnalysisSpec> {
    vec![
        AnalysisSpec {
            title: "Sales Distribution".to_string(),
            summary: "The sales distribution chart shows the spread of sales amounts. \
                      The histogram reveals the frequency of sales within certain ranges, \
                      providing a view of how sales amounts are distributed."
                .to_string(),
            kind: AggregationKind::Distribution {
                bins: DEFAULT_BINS,
            },
            value_column: columns::SALES.to_string(),
            group_column: None,
            chart: ChartKind::Histogram,
        },
        AnalysisSpec {
            title: "Sales by Order Status".to_string(),
            summary: "This boxplot shows the sales amounts categorized by order status. \
                      It highlights the distribution of sales for each status, including \
                      the median, quartiles, and potential outliers."
                .to_string(),
            kind: AggregationKind::FiveNumberSummary,
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::STATUS.to_string()),
            chart: ChartKind::Boxplot,
        },
        AnalysisSpec {
            title: "Sales by Quarter".to_string(),
            summary: "This bar chart depicts the total sales for each quarter. It helps \
                      in understanding the seasonal sales patterns and identifying the \
                      quarters with the highest sales."
                .to_string(),
            kind: AggregationKind::GroupedSum {
                order: GroupOrder::KeyAscending,
            },
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::QTR_ID.to_string()),
            chart: ChartKind::Bars,
        },
        AnalysisSpec {
            title: "Sales by Product Line".to_string(),
            summary: "This bar chart shows the total sales for each product line. It \
                      provides insights into which product lines contribute the most to \
                      the overall sales."
                .to_string(),
            kind: AggregationKind::GroupedSum {
                order: GroupOrder::TotalDescending,
            },
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::PRODUCTLINE.to_string()),
            chart: ChartKind::RotatedBars,
        },
        AnalysisSpec {
            title: "Top 10 Customers by Sales".to_string(),
            summary: "This bar chart identifies the top 10 customers by their total \
                      sales. It helps in recognizing key customers and understanding \
                      their importance to the business."
                .to_string(),
            kind: AggregationKind::TopN { n: TOP_CUSTOMERS },
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::CUSTOMERNAME.to_string()),
            chart: ChartKind::HorizontalBars,
        },
    ]
}

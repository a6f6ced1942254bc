//! Aggregation analyses over sales tables.
//!
//! The engine runs a declarative list of [`AnalysisSpec`] entries against a
//! [`sr_data::Table`] and produces one [`AnalysisResult`] per entry: a
//! derived series table plus a fixed human-readable caption, ready for
//! rendering.
//!
//! The standard catalog is the five sales analyses in fixed order:
//!
//! 1. Sales distribution (binned frequency)
//! 2. Sales by order status (five-number summary)
//! 3. Sales by quarter (grouped sum, buckets ascending)
//! 4. Sales by product line (grouped sum, totals descending)
//! 5. Top 10 customers by sales
//!
//! Schema validation is all-or-nothing: if any referenced column is absent
//! the whole run fails with [`AnalysisError::MissingColumn`] and nothing is
//! produced.

pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod error;

pub use catalog::{
    standard_analyses, AggregationKind, AnalysisSpec, ChartKind, GroupOrder, DEFAULT_BINS,
};
pub use engine::{run_analyses, AnalysisResult};
pub use error::{AnalysisError, Result};

/// Required column names for the standard sales analyses (exact match,
/// case-sensitive).
pub mod columns {
    /// Sale amount (numeric).
    pub const SALES: &str = "SALES";
    /// Order status (categorical).
    pub const STATUS: &str = "STATUS";
    /// Quarter bucket identifier.
    pub const QTR_ID: &str = "QTR_ID";
    /// Product line (categorical).
    pub const PRODUCTLINE: &str = "PRODUCTLINE";
    /// Customer name.
    pub const CUSTOMERNAME: &str = "CUSTOMERNAME";
}

/// Column names used by derived series tables.
pub mod series {
    /// Group or rank label.
    pub const LABEL: &str = "LABEL";
    /// Aggregated total for the label.
    pub const TOTAL: &str = "TOTAL";
    /// Inclusive lower edge of a distribution bin.
    pub const BIN_START: &str = "BIN_START";
    /// Exclusive upper edge of a distribution bin.
    pub const BIN_END: &str = "BIN_END";
    /// Observation count in a distribution bin.
    pub const COUNT: &str = "COUNT";
    /// Lower whisker bound of a five-number summary.
    pub const WHISKER_LO: &str = "WHISKER_LO";
    /// First quartile.
    pub const Q1: &str = "Q1";
    /// Median.
    pub const MEDIAN: &str = "MEDIAN";
    /// Third quartile.
    pub const Q3: &str = "Q3";
    /// Upper whisker bound of a five-number summary.
    pub const WHISKER_HI: &str = "WHISKER_HI";
}

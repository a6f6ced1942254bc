//! PDF report assembly and pipeline orchestration.
//!
//! Accumulates rendered charts into a paginated document in two phases:
//! first one narrative page per chart (title and caption), then one image
//! page per chart, in input order. Every page carries the fixed report
//! header. The serialized document is returned as bytes and persisted at a
//! well-known path, overwritten per invocation.
//!
//! [`Pipeline`] orchestrates the full run: analyses over the input table,
//! one chart render per analysis (abort on first failure), then assembly.
//! Transient chart images are released exactly once on every assembly exit
//! path.
//!
//! Concurrent pipeline runs against the same output path are not safe; the
//! caller must serialize invocations.
//!
//! # Example
//!
//! ```no_run
//! use sr_data::read_csv;
//! use sr_report::Pipeline;
//!
//! let table = read_csv(std::fs::File::open("sales.csv").unwrap()).unwrap();
//! let document = Pipeline::new().run(&table).unwrap();
//! assert!(document.bytes.starts_with(b"%PDF"));
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod pipeline;

pub use assembler::{Assembler, ReportDocument};
pub use config::ReportConfig;
pub use error::{AssemblyError, ReportError, Result};
pub use pipeline::Pipeline;

//! Tabular data source for sales report generation.
//!
//! Loads delimited text or spreadsheet data into a uniform in-memory
//! [`Table`]: an ordered sequence of named, typed columns. Lookups by row
//! position or column name are checked and surface as recoverable
//! [`DataError`] conditions, never panics.
//!
//! # Example
//!
//! ```
//! use sr_data::read_csv;
//!
//! let table = read_csv("SALES,STATUS\n10,Shipped\n20,Cancelled\n".as_bytes()).unwrap();
//! assert_eq!(table.rows(), 2);
//! assert_eq!(table.column("SALES").unwrap().len(), 2);
//! ```

pub mod error;
pub mod reader;
pub mod table;

pub use error::{DataError, Result};
pub use reader::{read_csv, read_spreadsheet};
pub use table::{Column, Table, Value};

//! Uniform in-memory table representation.

use crate::error::{DataError, Result};

/// A single cell value.
///
/// Columns are heterogeneous: numeric, categorical and bucket-identifier
/// columns all share this representation. Absent cells are explicit
/// [`Value::Null`] entries, so every row has an entry for every column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Floating-point number.
    Float(f64),
    /// Integer number.
    Int(i64),
    /// Free-form text (categories, names, bucket labels).
    Text(String),
    /// Explicitly absent cell.
    Null,
}

impl Value {
    /// Numeric view of the cell, coercing integers to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Text(_) | Value::Null => None,
        }
    }

    /// Label view of the cell. Numbers format as their shortest display form
    /// so bucket identifiers like quarter numbers group correctly.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format!("{}", f)),
            Value::Null => None,
        }
    }

    /// Whether the cell is explicitly absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A named, ordered column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a column from raw values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a float column.
    pub fn floats(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Float).collect())
    }

    /// Create an integer column.
    pub fn ints(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Int).collect())
    }

    /// Create a text column.
    pub fn texts(name: impl Into<String>, values: Vec<impl Into<String>>) -> Self {
        Self::new(
            name,
            values.into_iter().map(|v| Value::Text(v.into())).collect(),
        )
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All cells in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Cell at a row position, if in bounds.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Numeric views of every cell, in row order. Non-numeric and absent
    /// cells yield `None` at their position.
    pub fn numbers(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// Label views of every cell, in row order.
    pub fn labels(&self) -> Vec<Option<String>> {
        self.values.iter().map(Value::as_label).collect()
    }
}

/// An ordered sequence of named columns with a uniform row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table from columns. All columns must have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        for column in &columns {
            if column.len() != rows {
                return Err(DataError::RaggedColumns {
                    column: column.name().to_string(),
                    expected: rows,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Declared columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether a column with the exact (case-sensitive) name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Column lookup by exact name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Cell lookup by row position and column name, both checked.
    pub fn value(&self, row: usize, column: &str) -> Result<&Value> {
        if row >= self.rows {
            return Err(DataError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }
        let column = self.column(column)?;
        // In bounds by the row check above; columns are uniform length.
        column.get(row).ok_or(DataError::RowOutOfBounds {
            row,
            rows: self.rows,
        })
    }
}

//! Loaders for delimited text and spreadsheet inputs.

use crate::error::{DataError, Result};
use crate::table::{Column, Table, Value};

use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Parse a raw text cell into the narrowest matching [`Value`].
///
/// Integer first, then float, then text; blank cells are explicit nulls.
fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(trimmed.to_string())
}

/// Read a delimited dataset with a header record into a [`Table`].
///
/// The first record names the columns; every subsequent record becomes one
/// row. Ragged records surface as a [`DataError::Csv`].
pub fn read_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(DataError::EmptyInput);
    }
    debug!(columns = headers.len(), "reading delimited input");

    let mut values: Vec<Vec<Value>> = headers.iter().map(|_| Vec::new()).collect();
    for record in reader.records() {
        let record = record?;
        for (idx, cell) in record.iter().enumerate() {
            if idx < values.len() {
                values[idx].push(parse_cell(cell));
            }
        }
    }

    let columns = headers
        .into_iter()
        .zip(values)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    let table = Table::new(columns)?;
    info!(rows = table.rows(), columns = table.columns().len(), "delimited input loaded");
    Ok(table)
}

fn convert_sheet_cell(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::String(s) => parse_cell(s),
        Data::Bool(b) => Value::Text(b.to_string()),
        // Spreadsheet datetimes keep their numeric serial form; the pipeline
        // groups on discrete bucket identifiers, not calendar dates.
        Data::DateTime(dt) => Value::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(_) | Data::Empty => Value::Null,
    }
}

/// Read a spreadsheet file into a [`Table`].
///
/// The first row of the sheet names the columns. `sheet` selects a worksheet
/// by name; when absent the first sheet is used.
pub fn read_spreadsheet(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(DataError::EmptyInput)?,
    };
    debug!(path = %path.display(), sheet = %sheet_name, "reading spreadsheet");

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(DataError::EmptyInput)?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let mut values: Vec<Vec<Value>> = headers.iter().map(|_| Vec::new()).collect();
    for row in rows {
        for (idx, slot) in values.iter_mut().enumerate() {
            slot.push(row.get(idx).map(convert_sheet_cell).unwrap_or(Value::Null));
        }
    }

    let columns = headers
        .into_iter()
        .zip(values)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    let table = Table::new(columns)?;
    info!(rows = table.rows(), columns = table.columns().len(), "spreadsheet loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_types_are_inferred_per_cell() {
        let input = "SALES,STATUS,QTR_ID\n10.5,Shipped,1\n,Cancelled,2\n30,On Hold,2\n";
        let table = read_csv(input.as_bytes()).unwrap();

        assert_eq!(table.rows(), 3);
        let sales = table.column("SALES").unwrap();
        assert_eq!(sales.get(0), Some(&Value::Float(10.5)));
        assert_eq!(sales.get(1), Some(&Value::Null));
        assert_eq!(sales.get(2), Some(&Value::Int(30)));
        assert_eq!(
            table.value(2, "STATUS").unwrap(),
            &Value::Text("On Hold".to_string())
        );
    }

    #[test]
    fn csv_header_only_yields_empty_table() {
        let table = read_csv("A,B\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.has_column("A"));
    }

    #[test]
    fn ragged_csv_rows_error() {
        let err = read_csv("A,B\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn missing_spreadsheet_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_spreadsheet(dir.path().join("absent.xlsx"), None).unwrap_err();
        assert!(matches!(err, DataError::Spreadsheet(_) | DataError::Io(_)));
    }
}

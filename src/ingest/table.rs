use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::error::IngestError;
use crate::scoring::Cell;

static EMPTY: Cell = Cell::Empty;

/// A decoded table: a header row naming the columns, then data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Position of the column with exactly this name. Headers are not trimmed.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cell at `row`/`col`; rows shorter than the header read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decode UTF-8 CSV bytes. The first record names the columns.
pub fn decode_csv(bytes: &[u8]) -> Result<Table, IngestError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| IngestError::read(format!("file is not valid UTF-8 ({})", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::read)?
        .iter()
        .map(str::to_string)
        .collect();
    ensure_columns(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(IngestError::read)?;
        rows.push(record.iter().map(Cell::infer).collect());
    }

    Ok(Table { headers, rows })
}

/// Decode an xlsx/xls workbook. Only the first worksheet is read and its
/// first row names the columns. Blank rows are skipped.
pub fn decode_excel(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(IngestError::read)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::read("workbook has no worksheets"))?
        .map_err(IngestError::read)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|row| {
            row.iter().map(|c| excel_cell(c).to_string()).collect()
        })
        .unwrap_or_default();
    ensure_columns(&headers)?;

    let rows = sheet_rows
        .map(|row| row.iter().map(excel_cell).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

fn ensure_columns(headers: &[String]) -> Result<(), IngestError> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        Err(IngestError::read("no columns to parse from file"))
    } else {
        Ok(())
    }
}

/// Spreadsheets store every number as a float; whole values become integers
/// so identifiers and counts echo the way they were typed.
fn excel_cell(data: &Data) -> Cell {
    match data {
        Data::Int(n) => Cell::Int(*n),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Cell::Int(*f as i64),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Empty | Data::Error(_) => Cell::Empty,
        other => Cell::infer(&other.to_string()),
    }
}

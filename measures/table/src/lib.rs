use std::io::Read;

use bbrc_helpers::{StatsError, Value};
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

pub type Row = Vec<Value>;

/// Errors that can occur when reading a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The CSV text could not be parsed.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// How CSV text is turned into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct CsvFormat {
    pub delimiter: u8,
    /// Classify cells as integers or reals where they parse as such.
    /// Off by default: every non-empty cell stays text.
    pub numeric_cells: bool,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            numeric_cells: false,
        }
    }
}

impl CsvFormat {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_numeric_cells(mut self, numeric_cells: bool) -> Self {
        self.numeric_cells = numeric_cells;
        self
    }

    fn cell(&self, raw: &str) -> Value {
        if raw.is_empty() {
            Value::Missing
        } else if self.numeric_cells {
            Value::parse_cell(raw)
        } else {
            Value::Text(raw.to_string())
        }
    }
}

/// A row-major table. The first row, header or not, defines the width.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Reads every CSV record as a row. Records may differ in length.
    pub fn from_reader<R: Read>(reader: R, format: &CsvFormat) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(format.delimiter)
            .from_reader(reader);

        let mut rows: Vec<Row> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|raw| format.cell(raw)).collect());
        }
        debug!(rows = rows.len(), "parsed CSV table");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells in the first row, or zero for an empty table.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn column(&self, index: usize) -> Result<Vec<Value>, StatsError> {
        column(&self.rows, index)
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Parses CSV text with the default format.
pub fn parse_table(text: &str) -> Result<Table, TableError> {
    Table::from_reader(text.as_bytes(), &CsvFormat::default())
}

/// Takes the `index`-th cell of every row, header row included.
///
/// `index` must be below the width of the first row. A later row too short
/// to have the cell contributes `Value::Missing`.
///
/// # Errors
///
/// Returns `StatsError::IndexOutOfRange` if `index` is outside the first
/// row, which is always the case for an empty table.
pub fn column(rows: &[Row], index: usize) -> Result<Vec<Value>, StatsError> {
    let width = rows.first().map_or(0, Vec::len);
    if index >= width {
        return Err(StatsError::IndexOutOfRange { index, width }.logged("column"));
    }
    Ok(rows
        .iter()
        .map(|row| row.get(index).cloned().unwrap_or_default())
        .collect())
}

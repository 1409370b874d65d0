//! CSV-backed [`DataReader`].
//!
//! Every column is read as text; the contract orchestrator then coerces the
//! declared numerical columns. Header names are trimmed and a UTF-8 BOM on the
//! first header is stripped so contract lookups see the real names.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::contract::reader::{DataReader, ReadPermit};
use crate::contract::table::{Column, ColumnData, Table};
use crate::error::ContractError;

/// Reads a delimited text file into an all-text [`Table`].
#[derive(Debug, Clone)]
pub struct CsvReader {
    numerical: Vec<String>,
    categorical: Vec<String>,
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            numerical: Vec::new(),
            categorical: Vec::new(),
            delimiter: b',',
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare columns that must parse as numbers.
    pub fn numerical<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numerical = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Declare columns that are kept as categorical text.
    pub fn categorical<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl DataReader for CsvReader {
    fn ensure_numerical_cols(&self) -> &[String] {
        &self.numerical
    }

    fn ensure_categorical_cols(&self) -> &[String] {
        &self.categorical
    }

    fn read_data_file(&self, path: &Path, _permit: ReadPermit) -> Result<Table, ContractError> {
        let read_err = |message: String| ContractError::Read {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|e| read_err(format!("failed to open: {e}")))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| read_err(format!("failed to read headers: {e}")))?
            .clone();
        let names = header_names(&headers);

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for (idx, result) in reader.records().enumerate() {
            // +2: one for the header line, one for 1-based line numbers.
            let line = idx + 2;
            let record = result.map_err(|e| read_err(format!("line {line}: {e}")))?;
            for (col, field) in cells.iter_mut().zip(record.iter()) {
                col.push(Some(field).filter(|s| !s.is_empty()).map(str::to_string));
            }
        }

        Ok(Table::new(
            names
                .into_iter()
                .zip(cells)
                .map(|(name, values)| Column {
                    name,
                    data: ColumnData::Text(values),
                })
                .collect(),
        ))
    }
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .map(|name| name.trim().trim_start_matches('\u{feff}').to_string())
        .collect()
}

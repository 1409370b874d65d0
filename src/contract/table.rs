//! Columnar table produced by data readers.
//!
//! Readers are free to build tables however they like; nothing here enforces
//! shape on construction. The contract post-check calls
//! [`Table::validate_shape`] instead, so a reader that builds a ragged table
//! fails loudly at the orchestrator boundary.

use std::collections::HashSet;

/// Cell storage for one column. `None` is a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnData::Numeric(_) => "numeric",
            ColumnData::Text(_) => "text",
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Render a single cell for display (`""` when missing or out of range).
    pub fn cell_text(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| x.to_string())
                .unwrap_or_default(),
            ColumnData::Text(v) => v.get(row).cloned().flatten().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = Option<S>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }
}

/// Ordered set of named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build an all-text table from a header and rows; empty cells are missing.
    ///
    /// Short rows leave trailing cells missing.
    pub fn from_text_rows<R, S>(header: &[&str], rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cols: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for col in cols.iter_mut() {
                let cell = cells
                    .next()
                    .map(|c| c.as_ref().trim().to_string())
                    .filter(|c| !c.is_empty());
                col.push(cell);
            }
        }
        Self {
            columns: header
                .iter()
                .zip(cols)
                .map(|(name, values)| Column {
                    name: (*name).to_string(),
                    data: ColumnData::Text(values),
                })
                .collect(),
        }
    }

    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Check the table is rectangular with unique column names.
    pub fn validate_shape(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for c in &self.columns {
            if !seen.insert(c.name.as_str()) {
                return Err(format!("duplicate column name `{}`", c.name));
            }
        }
        let n = self.n_rows();
        if let Some(c) = self.columns.iter().find(|c| c.data.len() != n) {
            return Err(format!(
                "column `{}` has {} rows, expected {n}",
                c.name,
                c.data.len()
            ));
        }
        Ok(())
    }
}

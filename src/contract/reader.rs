//! Contracted data reading.
//!
//! A concrete reader implements [`DataReader`]: it declares which columns must
//! come out numeric and which must come out categorical, and it knows how to
//! turn a file into a [`Table`]. It never validates anything itself.
//!
//! [`execute_contracted_read`] is the only way to run a reader:
//!
//! 1. `pre_read_data`: the declared lists are well-formed and disjoint
//! 2. `read_data_file`: the reader's own logic
//! 3. `post_read_data`: the table is well-formed, every declared column is
//!    present, and declared columns are coerced in place
//!
//! `read_data_file` takes a [`ReadPermit`] that only this module can create,
//! so calling a reader directly (and skipping the checks) does not type-check
//! outside of it.

use std::collections::HashSet;
use std::path::Path;

use crate::contract::table::{ColumnData, Table};
use crate::error::{ColumnRole, ContractError};

/// Proof that a read is running inside the orchestrator.
#[derive(Debug)]
pub struct ReadPermit {
    _private: (),
}

/// A data-reading capability with a declared column contract.
pub trait DataReader {
    /// Columns that must be present and parse as numbers.
    fn ensure_numerical_cols(&self) -> &[String];

    /// Columns that must be present; they are converted to text.
    fn ensure_categorical_cols(&self) -> &[String];

    /// Read `path` into a table. Only reachable through the orchestrator.
    fn read_data_file(&self, path: &Path, permit: ReadPermit) -> Result<Table, ContractError>;
}

/// Run `reader` on `path` with the contract checked before and after.
pub fn execute_contracted_read<R>(reader: &R, path: &Path) -> Result<Table, ContractError>
where
    R: DataReader + ?Sized,
{
    pre_read_data(reader)?;
    let mut table = reader.read_data_file(path, ReadPermit { _private: () })?;
    post_read_data(reader, &mut table)?;
    log::debug!(
        "contracted read of '{}': {} rows x {} cols",
        path.display(),
        table.n_rows(),
        table.n_cols()
    );
    Ok(table)
}

/// Validate the reader's declared column lists.
pub fn pre_read_data<R: DataReader + ?Sized>(reader: &R) -> Result<(), ContractError> {
    check_names(reader.ensure_numerical_cols(), ColumnRole::Numerical)?;
    check_names(reader.ensure_categorical_cols(), ColumnRole::Categorical)?;

    let numerical: HashSet<&str> = reader.ensure_numerical_cols().iter().map(String::as_str).collect();
    let mut common: Vec<&str> = reader
        .ensure_categorical_cols()
        .iter()
        .map(String::as_str)
        .filter(|c| numerical.contains(c))
        .collect();
    if !common.is_empty() {
        common.sort_unstable();
        common.dedup();
        return Err(ContractError::Declaration(format!(
            "{common:?} both in the ensure_numerical_cols and ensure_categorical_cols"
        )));
    }
    Ok(())
}

/// Check the result table and coerce declared columns in place.
pub fn post_read_data<R: DataReader + ?Sized>(reader: &R, table: &mut Table) -> Result<(), ContractError> {
    table.validate_shape().map_err(ContractError::ResultType)?;

    for name in reader.ensure_numerical_cols() {
        let column = table.column_mut(name).ok_or_else(|| ContractError::MissingColumn {
            column: name.clone(),
            role: ColumnRole::Numerical,
        })?;
        if let ColumnData::Text(cells) = &column.data {
            let parsed = to_numeric(name, cells)?;
            column.data = ColumnData::Numeric(parsed);
        }
    }

    for name in reader.ensure_categorical_cols() {
        let column = table.column_mut(name).ok_or_else(|| ContractError::MissingColumn {
            column: name.clone(),
            role: ColumnRole::Categorical,
        })?;
        if let ColumnData::Numeric(cells) = &column.data {
            let text = cells.iter().map(|c| c.map(float_text)).collect();
            column.data = ColumnData::Text(text);
        }
    }

    Ok(())
}

fn check_names(names: &[String], role: ColumnRole) -> Result<(), ContractError> {
    for name in names {
        if name.trim().is_empty() || name.trim() != name {
            return Err(ContractError::Declaration(format!(
                "{} must be a list of non-empty, trimmed column names; got {name:?}",
                role.list_name()
            )));
        }
    }
    Ok(())
}

/// Float-column text form: whole numbers keep their `.0` (`1234.0`).
fn float_text(x: f64) -> String {
    format!("{x:?}")
}

fn to_numeric(column: &str, cells: &[Option<String>]) -> Result<Vec<Option<f64>>, ContractError> {
    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            let Some(raw) = cell.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                return Ok(None);
            };
            raw.parse::<f64>().map(Some).map_err(|_| ContractError::ColumnCoercion {
                column: column.to_string(),
                target: "numeric",
                row,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// A reader that can only be used through the contract.
#[derive(Debug, Clone)]
pub struct Contracted<R> {
    reader: R,
}

impl<R: DataReader> Contracted<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<Table, ContractError> {
        execute_contracted_read(&self.reader, path.as_ref())
    }

    pub fn inner(&self) -> &R {
        &self.reader
    }
}

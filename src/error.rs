//! Error types.
//!
//! `AppError` is the binary-facing error: a message plus a process exit code.
//! Library modules return the typed errors below and convert at the boundary:
//!
//! - `ConfigError` (exit code 2): usage and configuration schema failures
//! - `ContractError` (exit code 3): data reader contract failures
//! - download/network failures are raised directly as `AppError` (exit code 4)

use std::path::PathBuf;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures raised while constructing or updating a typed configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Malformed CLI invocation or non-keyword construction.
    #[error("usage error: {0}")]
    Usage(String),

    /// The field is not part of the configuration schema.
    #[error("unknown {config} field `{field}`")]
    UnknownField { config: &'static str, field: String },

    /// The value's kind does not match the declared field type.
    #[error("{config} type mismatch, key: ({field}) expect type: {expected}, pass value: {value}")]
    TypeMismatch {
        config: &'static str,
        field: String,
        expected: String,
        value: String,
    },

    /// The value is not a member of the field's closed enumeration.
    #[error("{config} field `{field}`: {value} not in [{allowed}]")]
    InvalidEnumValue {
        config: &'static str,
        field: String,
        value: String,
        allowed: String,
    },
}

/// Which contract list a column was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Numerical,
    Categorical,
}

impl ColumnRole {
    pub fn list_name(self) -> &'static str {
        match self {
            ColumnRole::Numerical => "ensure_numerical_cols",
            ColumnRole::Categorical => "ensure_categorical_cols",
        }
    }
}

/// Failures raised by the contracted read orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractError {
    /// The reader's declared column lists are malformed or overlap.
    #[error("invalid reader contract: {0}")]
    Declaration(String),

    /// The reader returned something that is not a well-formed table.
    #[error("`read_data_file` must return a well-formed table: {0}")]
    ResultType(String),

    /// A declared column is absent from the result.
    #[error("{}: `{column}` not in data columns", .role.list_name())]
    MissingColumn { column: String, role: ColumnRole },

    /// A declared column could not be coerced to its required representation.
    /// `row` counts data rows from 0, header excluded.
    #[error("failed to coerce column [{column}] to {target}: data row {row} (0-based) has value {value:?}")]
    ColumnCoercion {
        column: String,
        target: &'static str,
        row: usize,
        value: String,
    },

    /// The concrete reader failed to produce a table at all.
    #[error("failed to read '{}': {message}", .path.display())]
    Read { path: PathBuf, message: String },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        AppError::new(3, err.to_string())
    }
}

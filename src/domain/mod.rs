//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - runtime configuration values (`Value`)
//! - static schema vocabulary (`Literal`, `TypeTag`, `FieldSpec`)

pub mod types;

pub use types::*;

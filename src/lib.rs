//! `tabular-guard` library crate.
//!
//! Setup-time correctness checks for a tabular training pipeline:
//!
//! - `config`: keyword-only, type-checked configuration records with
//!   `--key=value` overrides
//! - `contract`: data readers whose declared columns are validated and coerced
//!   around every read
//! - `registry`: one shared instance per type
//!
//! The binary (`tg`) is a thin wrapper around this library.

pub mod app;
pub mod cli;
pub mod config;
pub mod contract;
pub mod data;
pub mod domain;
pub mod error;
pub mod registry;
pub mod report;

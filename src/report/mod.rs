//! Reporting utilities: config listings and table summaries.

pub mod format;

pub use format::{format_config, format_table_summary};

//! Typed configuration records.
//!
//! - schema declaration + validated construction/update (`typed`)
//! - `--key=value` command-line overrides (`overrides`)
//! - the pipeline's concrete records (`presets`)

pub mod overrides;
pub mod presets;
pub mod typed;

pub use overrides::{apply_cli_arguments, apply_process_arguments, parse_literal};
pub use presets::{ModelConfig, ModelSettings, TrainConfig, TrainSettings};
pub use typed::{ConfigArg, ConfigMap, ConfigSchema, TypedConfig, validate_schema};

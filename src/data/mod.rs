//! Dataset acquisition.

pub mod fetch;

pub use fetch::{cache_path, cache_root_from_env, download};

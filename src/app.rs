//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments
//! - dispatches to the config / contract / fetch code
//! - prints reports

use clap::Parser;

use crate::cli::{Command, ConfigArgs, FetchArgs, Preset, ReadArgs};
use crate::config::{ConfigSchema, ModelConfig, TrainConfig, TypedConfig, apply_cli_arguments};
use crate::contract::{Contracted, CsvReader};
use crate::error::AppError;

/// Entry point for the `tg` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Config(args) => handle_config(args),
        Command::Read(args) => handle_read(args),
        Command::Fetch(args) => handle_fetch(args),
    }
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn handle_config(args: ConfigArgs) -> Result<(), AppError> {
    print!("{}", render_config(&args)?);
    Ok(())
}

/// Build the chosen preset, apply the overrides and render it as text or JSON.
fn render_config(args: &ConfigArgs) -> Result<String, AppError> {
    match args.preset {
        Preset::Train => render_preset(TrainConfig::with_defaults()?, args),
        Preset::Model => render_preset(ModelConfig::with_defaults()?, args),
    }
}

fn render_preset<S: ConfigSchema>(mut config: TypedConfig<S>, args: &ConfigArgs) -> Result<String, AppError> {
    apply_cli_arguments(&mut config, &args.overrides)?;

    if args.json {
        let json = config
            .to_json()
            .map_err(|e| AppError::new(2, format!("Failed to serialise config: {e}")))?;
        Ok(format!("{json}\n"))
    } else {
        Ok(crate::report::format_config(&config))
    }
}

fn handle_read(args: ReadArgs) -> Result<(), AppError> {
    let delimiter = u8::try_from(args.delimiter)
        .map_err(|_| AppError::new(2, format!("Delimiter must be a single-byte character, got {:?}.", args.delimiter)))?;

    let reader = Contracted::new(
        CsvReader::new()
            .numerical(args.numerical)
            .categorical(args.categorical)
            .delimiter(delimiter),
    );
    let table = reader.read(&args.path)?;

    println!("=== {} ===", args.path.display());
    print!("{}", crate::report::format_table_summary(&table, args.head));
    Ok(())
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let cache_root = args
        .cache_dir
        .unwrap_or_else(crate::data::cache_root_from_env);
    let path = crate::data::download(&args.url, &args.name, &cache_root)?;
    println!("{}", path.display());
    Ok(())
}

//! Voxform binary - composition root.
//!
//! 1. Parse CLI arguments and install the tracing subscriber
//! 2. Load configuration from TOML and apply its log level
//! 3. Replay the engine script through a dictation session
//! 4. Print the final transcript to stdout

mod cli;
mod replay;
mod script;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

use voxform_core::config::VoxformConfig;

use cli::CliArgs;
use script::Script;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. RUST_LOG wins; otherwise the filter is swapped for the
    // configured level once the config file has been read.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let filter_from_env = env_filter.is_some();
    let initial_filter =
        env_filter.unwrap_or_else(|| EnvFilter::new(args.resolve_log_level("info")));
    let (filter, filter_handle) = reload::Layer::new(initial_filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Voxform v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = VoxformConfig::load_or_default(&config_file);
    if !filter_from_env {
        let level = args.resolve_log_level(&config.general.log_level);
        if let Err(e) = filter_handle.reload(EnvFilter::new(&level)) {
            tracing::warn!(error = %e, level = %level, "Failed to apply configured log level");
        }
    }
    if let Some(locale) = args.locale.clone() {
        config.dictation.locale_code = locale;
    }

    let script = Script::load(&args.script)?;
    let transcript = replay::replay(
        script,
        &config.dictation,
        Duration::from_millis(args.end_timeout_ms),
    )
    .await?;

    println!("{}", transcript);
    Ok(())
}

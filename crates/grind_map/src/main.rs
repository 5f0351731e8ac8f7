#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::too_many_lines, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::path::PathBuf;

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

mod commands;
mod settings;

pub use commands::Commands;
pub use settings::Settings;

#[derive(Parser)]
#[command(version, about = "Create, inspect and edit Grindfest .map files.")]
pub struct Cli {
    #[arg(help = "Settings file to use instead of the default location.", long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = Settings::config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn init_logging() -> Option<LoggerHandle> {
    let result = if let Some(log_dir) = get_log_dir() {
        Logger::try_with_env_or_str("info").and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory(&log_dir).basename("grind_map").suffix("log").suppress_timestamp())
                .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
                .duplicate_to_stderr(Duplicate::Warn)
                .start()
        })
    } else {
        eprintln!("Failed to create log directory, logging to stderr only");
        Logger::try_with_env_or_str("warn").and_then(|logger| logger.log_to_stderr().start())
    };

    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() {
    let args = Cli::parse();
    let logger = init_logging();

    log::info!("Starting grind_map {}", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::load(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings, using defaults: {err}");
            Settings::default()
        }
    };

    if let Err(err) = commands::run(args.command, &settings) {
        // errors reach stderr through the logger's duplicate when it runs
        if logger.is_some() {
            log::error!("{err:#}");
        } else {
            eprintln!("Error: {err:#}");
        }
        drop(logger);
        std::process::exit(1);
    }
}

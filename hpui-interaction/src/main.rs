//! `hpui-replay`: runs a recorded contact scenario through the gesture logic
//! and prints every delivered event.
//!
//! Usage:
//!   hpui-replay scenarios/swipe_fallback.toml --log-level debug

use clap::Parser;
use hpui_core::{init_logging, ConfigLoader};
use hpui_interaction::replay::Scenario;
use hpui_interaction::InteractionError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "hpui-replay")]
#[command(about = "Replay HPUI contact frames and print tap/gesture events")]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Core config file; defaults to $HPUI_CONFIG or the user config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Overrides the configured log format (text or json)
    #[arg(long)]
    log_format: Option<String>,
}

fn run(args: Args) -> Result<(), InteractionError> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    ConfigLoader::validate_config(&mut config)?;
    init_logging(&config.logging, false)?;

    tracing::info!("Loading scenario from {:?}", args.scenario);
    let scenario = Scenario::from_path(&args.scenario)?;
    let report = scenario.run()?;

    for event in &report.events {
        println!("{}", event);
    }
    println!(
        "{} frames, {} taps, {} gestures",
        report.frames,
        report.tap_count(),
        report.gesture_count()
    );
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("hpui-replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! Hawkins signal terminal entry point.
//!
//! # Usage
//!
//! ```bash
//! # Default session, bell beeps, no logging
//! hawkins-tui
//!
//! # Short possessions, silent, debug log to a file
//! hawkins-tui --possession-secs 10 --mute --log-file hawkins.log --log-level debug
//!
//! # Tuned session from a TOML file
//! hawkins-tui --config hawkins.toml
//! ```

use std::{error::Error, fs, fs::OpenOptions, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use hawkins_core::{Beeper, Environment, SessionConfig, Silent};
use hawkins_tui::{App, Runtime, SystemEnv, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Hawkins signal terminal
#[derive(Parser, Debug)]
#[command(name = "hawkins-tui")]
#[command(about = "Spell messages on the wall of lights before the Upside Down takes you")]
#[command(version)]
struct Args {
    /// Session settings in TOML (durations in milliseconds)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How long a possession lasts before it releases you, in seconds
    /// [default: 30, overrides the config file]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    possession_secs: Option<u64>,

    /// Never make a sound
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (the terminal itself is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

type Tone = Box<dyn Beeper>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = session_config(&args)?;
    let possession_secs = config.possession_duration.as_secs();
    let (signal, alarm) = beepers(args.mute);
    let app = App::new(config, signal, alarm, SystemEnv::new().now())?;

    tracing::info!(possession_secs, mute = args.mute, "session starting");

    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, app);
    runtime.run().await?;

    tracing::info!("session over");
    Ok(())
}

/// Defaults, then the config file, then flags.
fn session_config(args: &Args) -> Result<SessionConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            SessionConfig::from_toml(&text)?
        },
        None => SessionConfig::default(),
    };
    if let Some(secs) = args.possession_secs {
        config = config.with_possession_duration(Duration::from_secs(secs));
    }
    config.validate()?;
    Ok(config)
}

/// Signal and alarm beepers.
fn beepers(mute: bool) -> (Tone, Tone) {
    if mute {
        return (Box::new(Silent), Box::new(Silent));
    }

    #[cfg(feature = "audio")]
    {
        (Box::new(hawkins_tui::ToneBeeper::signal()), Box::new(hawkins_tui::ToneBeeper::alarm()))
    }

    #[cfg(not(feature = "audio"))]
    {
        (Box::new(hawkins_tui::TerminalBell), Box::new(hawkins_tui::TerminalBell))
    }
}

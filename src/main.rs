//! `u-rotation` batch entry point.
//!
//! Creates the working directories, installs logging (stdout plus
//! `script_events.log`), and runs one rotation.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use u_rotation::config::RotationConfig;
use u_rotation::job::RotationJob;

const EVENT_LOG: &str = "script_events.log";

/// Rebuild the weekly duty rotation from the team roster.
#[derive(Debug, Parser)]
#[command(name = "u-rotation", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the pair shuffle (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of weeks to schedule.
    #[arg(long)]
    num_weeks: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RotationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RotationConfig::default(),
    };
    if let Some(num_weeks) = cli.num_weeks {
        config = config.with_num_weeks(num_weeks);
    }

    for dir in [&config.data_dir, &config.history_dir, &config.log_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let log_path = config.log_dir.join(EVENT_LOG);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .init();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    RotationJob::new(config)
        .run(&mut rng)
        .context("Rotation run failed")?;
    Ok(())
}
